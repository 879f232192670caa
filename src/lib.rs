//! # HealthBot consultation server
//!
//! A single-endpoint web service: `POST /consult` takes a symptom description,
//! wraps it in a referral-aware prompt together with the session's earlier
//! exchanges, sends it to an OpenAI-compatible completion service (Groq by
//! default) and returns the reply flattened into plain text.
//!
//! ## Library usage
//!
//! ```rust,ignore
//! use healthbot::{api::routes::build_app, AppState, HealthbotConfig};
//!
//! let config = HealthbotConfig::load("healthbot.toml")?;
//! let app = build_app(AppState::from_config(config)?);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST handlers and router
//! - [`agents`] - The health agent that renders the prompt and calls the model
//! - [`doctors`] - Doctor contact sets used for referrals
//! - [`llm`] - Completion client trait and OpenAI-compatible implementation
//! - [`memory`] - Session-keyed, bounded conversation memory
//! - [`prompts`] - Typed consultation prompt
//! - [`types`] - Requests, responses and errors
//! - [`utils`] - Configuration and response cleanup

#![warn(rustdoc::missing_crate_level_docs)]

/// Consultation agents.
pub mod agents;
/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface for the server binary.
pub mod cli;
/// Doctor contact directories.
pub mod doctors;
/// LLM provider clients and abstractions.
pub mod llm;
/// Conversation memory.
pub mod memory;
/// Prompt templates.
pub mod prompts;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration and text utilities.
pub mod utils;

// Re-export commonly used types
pub use llm::{LLMClient, LLMClientFactory, LLMClientFactoryTrait, Provider};
pub use memory::ConversationMemory;
pub use types::{AppError, Result};
pub use utils::config::{ConfigError, HealthbotConfig};

use crate::doctors::DoctorDirectory;
use axum::http::HeaderName;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Effective configuration
    pub config: Arc<HealthbotConfig>,
    /// Completion client factory
    pub llm_factory: Arc<dyn LLMClientFactoryTrait>,
    /// The process-wide conversation memory
    pub memory: Arc<ConversationMemory>,
    /// Contacts rendered into the prompt
    pub referrals: Arc<DoctorDirectory>,
    /// Header carrying the session id
    pub session_header: HeaderName,
}

impl AppState {
    /// Build the state with the provider described by the configuration.
    pub fn from_config(config: HealthbotConfig) -> std::result::Result<Self, ConfigError> {
        let factory = Arc::new(LLMClientFactory::from_config(&config));
        Self::with_llm_factory(config, factory)
    }

    /// Build the state around an existing client factory.
    pub fn with_llm_factory(
        config: HealthbotConfig,
        llm_factory: Arc<dyn LLMClientFactoryTrait>,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        let session_header = config.session_header()?;
        let memory = Arc::new(ConversationMemory::from_config(&config.memory));
        let referrals = Arc::new(config.doctors.active().clone());

        Ok(Self {
            config: Arc::new(config),
            llm_factory,
            memory,
            referrals,
            session_header,
        })
    }
}
