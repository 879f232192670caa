use crate::llm::client::LLMClient;
use crate::types::{AppError, Result};
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("healthbot-server/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Chat-completions client for any OpenAI-compatible endpoint (Groq included).
pub struct OpenAIClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAIClient {
    pub fn new(api_key: String, api_base: String, model: String) -> Result<Self> {
        let base = reqwest::Url::parse(&api_base)
            .map_err(|e| AppError::Setup(format!("invalid api base '{}': {}", api_base, e)))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::Setup(format!(
                "api base '{}' must use http or https",
                api_base
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| AppError::Setup(format!("failed to build HTTP client: {}", e)))?;

        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base.trim_end_matches('/'));

        Ok(Self {
            client: Client::with_config(config).with_http_client(http),
            model,
        })
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessage::from(prompt),
            )])
            .build()
            .map_err(|e| AppError::Invocation(format!("Failed to build request: {}", e)))?;

        debug!(model = %self.model, prompt_chars = prompt.len(), "Sending chat completion");

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AppError::Invocation(format!("Provider API error: {}", e)))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::Invocation("No response content from provider".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
