//! LLM client abstractions and provider selection
//!
//! Both supported providers speak the OpenAI chat-completions protocol:
//! - **Groq**: hosted open models (default)
//! - **OpenAI**: the OpenAI API or any compatible endpoint

use crate::types::{AppError, Result};
use crate::utils::config::{HealthbotConfig, ProviderKind};
use async_trait::async_trait;
use std::time::Duration;

/// Generic LLM client trait for provider abstraction
///
/// The consultation path only needs a single-shot completion: conversation
/// history is carried inside the prompt itself.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion from a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}

/// Provider enum for runtime selection
#[derive(Debug, Clone)]
pub enum Provider {
    /// Groq's OpenAI-compatible endpoint
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::Groq {
    ///     api_key: std::env::var("Groq_api_key").unwrap_or_default(),
    ///     api_base: "https://api.groq.com/openai/v1".to_string(),
    ///     model: "mixtral-8x7b-32768".to_string(),
    /// };
    /// ```
    Groq {
        api_key: String,
        api_base: String,
        model: String,
    },

    /// OpenAI API provider (including compatible APIs)
    OpenAI {
        api_key: String,
        api_base: String,
        model: String,
    },
}

impl Provider {
    /// Build the provider described by the configuration, reading the API key
    /// from the environment. A missing key becomes an empty key: the provider
    /// rejects it at call time.
    pub fn from_config(config: &HealthbotConfig) -> Self {
        let api_key = config.api_key().unwrap_or_default();
        let api_base = config.provider.api_base().to_string();
        let model = config.provider.model().to_string();

        match config.provider.kind {
            ProviderKind::Groq => Provider::Groq {
                api_key,
                api_base,
                model,
            },
            ProviderKind::OpenAI => Provider::OpenAI {
                api_key,
                api_base,
                model,
            },
        }
    }

    /// Create a client instance for this provider
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Setup`] if the base URL is not an absolute http(s)
    /// URL or the HTTP client cannot be built.
    pub fn create_client(&self) -> Result<Box<dyn LLMClient>> {
        match self {
            Provider::Groq {
                api_key,
                api_base,
                model,
            }
            | Provider::OpenAI {
                api_key,
                api_base,
                model,
            } => Ok(Box::new(super::openai::OpenAIClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
            )?)),
        }
    }

    /// Get a human-readable name for this provider
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Groq { .. } => "Groq",
            Provider::OpenAI { .. } => "OpenAI",
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Provider::Groq { model, .. } | Provider::OpenAI { model, .. } => model,
        }
    }
}

/// Seam for creating completion clients, so handlers can be tested with mocks.
#[async_trait]
pub trait LLMClientFactoryTrait: Send + Sync {
    /// Get the default provider configuration
    fn default_provider(&self) -> &Provider;

    /// Create a client using the default provider
    async fn create_default(&self) -> Result<Box<dyn LLMClient>>;

    /// Upper bound on one completion call
    fn timeout(&self) -> Duration;
}

/// Configuration-based client factory
pub struct LLMClientFactory {
    default_provider: Provider,
    timeout: Duration,
}

impl LLMClientFactory {
    /// Create a new factory with the specified default provider
    pub fn new(default_provider: Provider, timeout: Duration) -> Self {
        Self {
            default_provider,
            timeout,
        }
    }

    pub fn from_config(config: &HealthbotConfig) -> Self {
        Self::new(Provider::from_config(config), config.provider.timeout())
    }
}

#[async_trait]
impl LLMClientFactoryTrait for LLMClientFactory {
    fn default_provider(&self) -> &Provider {
        &self.default_provider
    }

    async fn create_default(&self) -> Result<Box<dyn LLMClient>> {
        self.default_provider.create_client()
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}
