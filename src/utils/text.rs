//! Cleanup of raw model replies.
//!
//! Chat models answer in markdown: paragraphs separated by blank lines,
//! bullet lists, `**bold**` spans. The consultation response is a single flat
//! string, so those artifacts are flattened into plain spaced text.

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Flattens a model reply into a single line.
///
/// Applied in order: paragraph breaks (`\n\n`) become a space, remaining line
/// breaks become a space, asterisks become a space, then every run of
/// whitespace collapses to one space. Surrounding whitespace is collapsed but
/// not trimmed. The result contains no line breaks, no asterisks and no
/// consecutive spaces, so applying the function twice changes nothing.
pub fn clean_health_advice(raw: &str) -> String {
    let flattened = raw
        .replace("\n\n", " ")
        .replace('\n', " ")
        .replace('*', " ");

    WHITESPACE_RUN.replace_all(&flattened, " ").into_owned()
}
