//! TOML-based configuration for the consultation server
//!
//! Every field carries a serde default, so the server can start without a
//! `healthbot.toml` at all. Secrets are never stored in the file: the provider
//! section names the environment variable that holds the API key.

use crate::doctors::{default_directory, default_prompt_referrals, DoctorDirectory, ReferralSource};
use axum::http::HeaderName;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure loaded from healthbot.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthbotConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub memory: MemoryConfig,

    #[serde(default)]
    pub doctors: DoctorsConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

// ============= Provider Configuration =============

/// Completion service flavour. Both speak the OpenAI chat-completions protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Groq,
    #[serde(rename = "openai")]
    #[value(name = "openai")]
    OpenAI,
}

impl ProviderKind {
    pub fn default_api_base(&self) -> &'static str {
        match self {
            Self::Groq => "https://api.groq.com/openai/v1",
            Self::OpenAI => "https://api.openai.com/v1",
        }
    }

    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            Self::Groq => "Groq_api_key",
            Self::OpenAI => "OPENAI_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Groq => "mixtral-8x7b-32768",
            Self::OpenAI => "gpt-4o-mini",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(rename = "type", default)]
    pub kind: ProviderKind,

    /// Environment variable containing the API key (defaults per provider)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Upper bound on a single completion call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            api_key_env: None,
            api_base: None,
            model: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProviderConfig {
    pub fn api_key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or_else(|| self.kind.default_api_key_env())
    }

    pub fn api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .unwrap_or_else(|| self.kind.default_api_base())
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.kind.default_model())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ============= Memory Configuration =============

/// How conversation memory is partitioned between callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryScope {
    /// One history per session id, taken from a request header.
    #[default]
    Session,
    /// A single history shared by every caller.
    Shared,
}

impl MemoryScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::Shared => "shared",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default)]
    pub scope: MemoryScope,

    #[serde(default = "default_session_header")]
    pub session_header: String,

    /// Messages kept per session (one exchange is two messages)
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,

    /// Sessions kept before the least recently used one is dropped
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_session_header() -> String {
    "x-session-id".to_string()
}

fn default_max_messages() -> usize {
    20
}

fn default_max_sessions() -> usize {
    1024
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            scope: MemoryScope::default(),
            session_header: default_session_header(),
            max_messages: default_max_messages(),
            max_sessions: default_max_sessions(),
        }
    }
}

// ============= Doctor Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorsConfig {
    #[serde(default)]
    pub source: ReferralSource,

    #[serde(default = "default_prompt_referrals")]
    pub prompt: DoctorDirectory,

    #[serde(default = "default_directory")]
    pub directory: DoctorDirectory,
}

impl Default for DoctorsConfig {
    fn default() -> Self {
        Self {
            source: ReferralSource::default(),
            prompt: default_prompt_referrals(),
            directory: default_directory(),
        }
    }
}

impl DoctorsConfig {
    /// The contact set selected by `source`.
    pub fn active(&self) -> &DoctorDirectory {
        match self.source {
            ReferralSource::Prompt => &self.prompt,
            ReferralSource::Directory => &self.directory,
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl HealthbotConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load the file if it exists, otherwise fall back to the built-in defaults.
    ///
    /// The boolean reports whether a file was read.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<(Self, bool), ConfigError> {
        match Self::load(path) {
            Ok(config) => Ok((config, true)),
            Err(ConfigError::FileNotFound(_)) => Ok((Self::default(), false)),
            Err(e) => Err(e),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: HealthbotConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the configuration for internal consistency.
    ///
    /// The API key variable is deliberately not checked here: a missing key
    /// surfaces as a completion failure at request time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.model().trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "provider.model must not be empty".to_string(),
            ));
        }

        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "provider.timeout_secs must be greater than zero".to_string(),
            ));
        }

        let api_base = self.provider.api_base();
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "provider.api_base must be an http(s) URL, got '{}'",
                api_base
            )));
        }

        if self.memory.max_messages < 2 || self.memory.max_messages % 2 != 0 {
            return Err(ConfigError::ValidationError(format!(
                "memory.max_messages must be an even number of at least 2 (one exchange is two messages), got {}",
                self.memory.max_messages
            )));
        }

        if self.memory.max_sessions == 0 {
            return Err(ConfigError::ValidationError(
                "memory.max_sessions must be greater than zero".to_string(),
            ));
        }

        self.session_header()?;

        Ok(())
    }

    /// The parsed session header name.
    pub fn session_header(&self) -> Result<HeaderName, ConfigError> {
        HeaderName::from_bytes(self.memory.session_header.as_bytes()).map_err(|e| {
            ConfigError::ValidationError(format!(
                "memory.session_header '{}' is not a valid header name: {}",
                self.memory.session_header, e
            ))
        })
    }

    /// Resolve the provider API key from the environment.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(self.provider.api_key_env()).ok()
    }
}
