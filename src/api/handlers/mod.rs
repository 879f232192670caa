//! API request handlers.

/// Symptom consultation handler.
pub mod consult;
/// Health check handler.
pub mod health;
