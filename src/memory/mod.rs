//! Conversation memory for consultations.
//!
//! Exactly one [`ConversationMemory`] lives in the application state. It holds
//! a bounded history per session:
//!
//! - in [`MemoryScope::Session`] the session id comes from a request header,
//!   and a fresh id is minted when the caller sends none;
//! - in [`MemoryScope::Shared`] every request reads and appends to the single
//!   [`SHARED_MEMORY_KEY`] history, so callers see each other's exchanges.
//!
//! Each session keeps at most `max_messages` messages, counted in whole
//! exchanges (oldest exchange dropped first)
//! and at most `max_sessions` sessions are retained (least recently used
//! dropped first). The lock is only held for snapshot and append, never
//! across the completion call.

use crate::types::{Message, MessageRole};
use crate::utils::config::{MemoryConfig, MemoryScope};
use lru::LruCache;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use tracing::debug;
use uuid::Uuid;

/// Key of the single history used in shared scope.
pub const SHARED_MEMORY_KEY: &str = "chat_history";

/// Longest caller-supplied session id that is accepted as-is.
pub const MAX_SESSION_ID_LEN: usize = 128;

/// Rendered in place of the history when a session has none yet.
pub const EMPTY_HISTORY_PLACEHOLDER: &str = "(no previous conversation)";

/// The memory partition a request reads from and appends to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKey {
    id: String,
    minted: bool,
}

impl SessionKey {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the id was generated for this request rather than supplied.
    pub fn is_minted(&self) -> bool {
        self.minted
    }
}

pub struct ConversationMemory {
    scope: MemoryScope,
    max_messages: usize,
    sessions: Mutex<LruCache<String, VecDeque<Message>>>,
}

impl ConversationMemory {
    pub fn new(scope: MemoryScope, max_messages: usize, max_sessions: NonZeroUsize) -> Self {
        Self {
            scope,
            max_messages: (max_messages.max(2) / 2) * 2,
            sessions: Mutex::new(LruCache::new(max_sessions)),
        }
    }

    pub fn from_config(config: &MemoryConfig) -> Self {
        let max_sessions = NonZeroUsize::new(config.max_sessions).unwrap_or(NonZeroUsize::MIN);
        Self::new(config.scope, config.max_messages, max_sessions)
    }

    pub fn scope(&self) -> MemoryScope {
        self.scope
    }

    /// Picks the session for a request given the raw header value, if any.
    pub fn resolve_session(&self, requested: Option<&str>) -> SessionKey {
        if self.scope == MemoryScope::Shared {
            return SessionKey {
                id: SHARED_MEMORY_KEY.to_string(),
                minted: false,
            };
        }

        match requested.map(str::trim) {
            Some(id) if !id.is_empty() && id.len() <= MAX_SESSION_ID_LEN => SessionKey {
                id: id.to_string(),
                minted: false,
            },
            _ => SessionKey {
                id: Uuid::new_v4().to_string(),
                minted: true,
            },
        }
    }

    /// Snapshot of a session's history, oldest first.
    pub fn history(&self, session: &SessionKey) -> Vec<Message> {
        self.sessions
            .lock()
            .get(session.id())
            .map(|history| history.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Records one completed exchange. Both messages are appended under a
    /// single lock acquisition so a session never holds half an exchange.
    pub fn append_exchange(&self, session: &SessionKey, symptoms: &str, response: &str) {
        let mut sessions = self.sessions.lock();
        let history = sessions.get_or_insert_mut(session.id().to_string(), VecDeque::new);

        history.push_back(Message::user(symptoms));
        history.push_back(Message::assistant(response));

        while history.len() > self.max_messages {
            history.pop_front();
            history.pop_front();
        }

        debug!(
            session_id = %session.id(),
            messages = history.len(),
            "Recorded consultation exchange"
        );
    }

    /// Number of sessions currently held.
    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }
}

/// Formats history as a transcript for inclusion in the prompt.
pub fn format_history_for_prompt(history: &[Message]) -> String {
    if history.is_empty() {
        return EMPTY_HISTORY_PLACEHOLDER.to_string();
    }

    history
        .iter()
        .map(|msg| {
            let speaker = match msg.role {
                MessageRole::User => "Human",
                MessageRole::Assistant => "AI",
            };
            format!("{}: {}", speaker, msg.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_memory(max_messages: usize, max_sessions: usize) -> ConversationMemory {
        ConversationMemory::new(
            MemoryScope::Session,
            max_messages,
            NonZeroUsize::new(max_sessions).expect("non-zero"),
        )
    }

    #[test]
    fn test_shared_scope_ignores_requested_id() {
        let memory = ConversationMemory::from_config(&MemoryConfig {
            scope: MemoryScope::Shared,
            ..MemoryConfig::default()
        });

        let session = memory.resolve_session(Some("alice"));
        assert_eq!(session.id(), SHARED_MEMORY_KEY);
        assert!(!session.is_minted());
    }

    #[test]
    fn test_session_scope_uses_header_or_mints() {
        let memory = session_memory(10, 10);

        let supplied = memory.resolve_session(Some("  alice "));
        assert_eq!(supplied.id(), "alice");
        assert!(!supplied.is_minted());

        let minted = memory.resolve_session(None);
        assert!(minted.is_minted());
        assert!(Uuid::parse_str(minted.id()).is_ok());

        let blank = memory.resolve_session(Some("   "));
        assert!(blank.is_minted());

        let oversized = "x".repeat(MAX_SESSION_ID_LEN + 1);
        assert!(memory.resolve_session(Some(&oversized)).is_minted());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let memory = session_memory(10, 10);
        let alice = memory.resolve_session(Some("alice"));
        let bob = memory.resolve_session(Some("bob"));

        memory.append_exchange(&alice, "itchy eyes", "use eye drops");

        assert_eq!(memory.history(&alice).len(), 2);
        assert!(memory.history(&bob).is_empty());
    }

    #[test]
    fn test_history_is_a_rolling_window() {
        let memory = session_memory(4, 10);
        let session = memory.resolve_session(Some("s"));

        for i in 0..5 {
            memory.append_exchange(&session, &format!("q{}", i), &format!("a{}", i));
        }

        let history = memory.history(&session);
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].content, "q3");
        assert_eq!(history[0].role, MessageRole::User);
        assert_eq!(history[3].content, "a4");
        assert_eq!(history[3].role, MessageRole::Assistant);
    }

    #[test]
    fn test_window_never_splits_an_exchange() {
        let memory = session_memory(3, 10);
        let session = memory.resolve_session(Some("s"));

        for i in 0..3 {
            memory.append_exchange(&session, &format!("q{}", i), &format!("a{}", i));
        }

        let history = memory.history(&session);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, MessageRole::User);
        assert_eq!(history[0].content, "q2");
        assert_eq!(history[1].content, "a2");
    }

    #[test]
    fn test_least_recent_session_is_evicted() {
        let memory = session_memory(10, 2);
        let first = memory.resolve_session(Some("first"));
        let second = memory.resolve_session(Some("second"));
        let third = memory.resolve_session(Some("third"));

        memory.append_exchange(&first, "a", "b");
        memory.append_exchange(&second, "c", "d");
        memory.append_exchange(&third, "e", "f");

        assert_eq!(memory.session_count(), 2);
        assert!(memory.history(&first).is_empty());
        assert_eq!(memory.history(&third).len(), 2);
    }

    #[test]
    fn test_format_history_for_prompt() {
        assert_eq!(format_history_for_prompt(&[]), EMPTY_HISTORY_PLACEHOLDER);

        let transcript = format_history_for_prompt(&[
            Message::user("headache since monday"),
            Message::assistant("drink water"),
        ]);
        assert_eq!(
            transcript,
            "Human: headache since monday\nAI: drink water"
        );
    }
}
