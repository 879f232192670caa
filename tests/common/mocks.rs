//! Mock implementations for testing.
//!
//! This module provides a mock LLM client and factory that can be shared
//! across test files without duplication.

use async_trait::async_trait;
use healthbot::llm::{LLMClient, LLMClientFactoryTrait, Provider};
use healthbot::types::{AppError, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Mock LLM client with a configurable reply.
///
/// Every prompt it receives is recorded so tests can inspect what the
/// consultation handler actually sent.
#[derive(Clone)]
pub struct MockLLMClient {
    response: String,
    should_fail: bool,
    delay: Option<Duration>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockLLMClient {
    /// Create a new mock client that returns the given response.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
            delay: None,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock client that always returns an invocation error.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new("")
        }
    }

    /// Create a mock client that answers only after `delay`.
    pub fn slow(response: &str, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(response)
        }
    }

    /// Prompts received so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.should_fail {
            return Err(AppError::Invocation(
                "Mock LLM failure: upstream unavailable".to_string(),
            ));
        }
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Factory handing out clones of one [`MockLLMClient`], or failing setup.
pub struct MockLLMFactory {
    provider: Provider,
    client: MockLLMClient,
    setup_error: Option<String>,
    timeout: Duration,
}

impl MockLLMFactory {
    pub fn new(client: MockLLMClient) -> Self {
        Self {
            provider: Provider::Groq {
                api_key: "test-key".to_string(),
                api_base: "http://localhost:1/openai/v1".to_string(),
                model: "mock-model".to_string(),
            },
            client,
            setup_error: None,
            timeout: Duration::from_secs(5),
        }
    }

    /// A factory whose client construction always fails.
    pub fn failing_setup(message: &str) -> Self {
        Self {
            setup_error: Some(message.to_string()),
            ..Self::new(MockLLMClient::new(""))
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl LLMClientFactoryTrait for MockLLMFactory {
    fn default_provider(&self) -> &Provider {
        &self.provider
    }

    async fn create_default(&self) -> Result<Box<dyn LLMClient>> {
        match &self.setup_error {
            Some(message) => Err(AppError::Setup(message.clone())),
            None => Ok(Box::new(self.client.clone())),
        }
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}
