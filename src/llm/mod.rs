//! LLM Provider Clients and Abstractions
//!
//! The consultation handler talks to the completion service only through the
//! [`LLMClient`] trait. Clients are produced per request by an
//! [`LLMClientFactoryTrait`] implementation held in the application state,
//! which is also the seam tests use to inject mock clients.
//!
//! # Example
//!
//! ```ignore
//! use healthbot::llm::{LLMClientFactory, LLMClientFactoryTrait};
//!
//! let factory = LLMClientFactory::from_config(&config);
//! let client = factory.create_default().await?;
//! let text = client.generate("I have a headache").await?;
//! ```

/// Core LLM client trait, provider enum and factory.
pub mod client;
/// OpenAI-compatible chat-completions client.
pub mod openai;

pub use client::{LLMClient, LLMClientFactory, LLMClientFactoryTrait, Provider};
pub use openai::OpenAIClient;
