//! Init command implementation
//!
//! Writes a commented `healthbot.toml` and a `.env.example` into a directory.

use super::output::Output;
use crate::utils::config::ProviderKind;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
#[derive(Debug, PartialEq, Eq)]
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// healthbot.toml already exists and `force` was not given
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: PathBuf,
    /// Overwrite existing files
    pub force: bool,
    /// Completion provider to configure
    pub provider: ProviderKind,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.section("Initializing HealthBot configuration");

    let base_path = &config.path;
    if !base_path.exists() {
        if let Err(e) = fs::create_dir_all(base_path) {
            output.error(&format!("Failed to create {}: {}", base_path.display(), e));
            return InitResult::Error(e.to_string());
        }
    }

    let config_path = base_path.join("healthbot.toml");
    if config_path.exists() && !config.force {
        output.warning("healthbot.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    if let Err(e) = write_file(&config_path, &generate_healthbot_toml(config.provider), config.force) {
        output.error(&format!("Failed to create healthbot.toml: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("config", "healthbot.toml");

    let env_path = base_path.join(".env.example");
    if env_path.exists() && !config.force {
        output.skipped(".env.example", "already exists");
    } else if let Err(e) = write_file(&env_path, &generate_env_example(config.provider), config.force) {
        output.error(&format!("Failed to create .env.example: {}", e));
        return InitResult::Error(e.to_string());
    } else {
        output.created("env", ".env.example");
    }

    output.success("HealthBot configuration written");
    output.next_steps(config.provider);

    InitResult::Success
}

fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<()> {
    if path.exists() && !force {
        return Ok(()); // Skip existing files unless force is true
    }
    fs::write(path, content)
}

fn generate_healthbot_toml(provider: ProviderKind) -> String {
    let provider_type = match provider {
        ProviderKind::Groq => "groq",
        ProviderKind::OpenAI => "openai",
    };

    format!(
        r#"# HealthBot configuration
# Every value below is optional; the shown values are the defaults.

[server]
host = "0.0.0.0"
port = 8000
log_level = "info"      # overridden by RUST_LOG
log_format = "pretty"   # or "json"

[provider]
type = "{provider_type}"
api_key_env = "{api_key_env}"   # name of the variable holding the key, not the key
api_base = "{api_base}"
model = "{model}"
timeout_secs = 60

[memory]
# "session": one history per x-session-id header (a new id is issued when absent)
# "shared": a single history for every caller
scope = "session"
session_header = "x-session-id"
max_messages = 20
max_sessions = 1024

[doctors]
# Which contact set is quoted in the prompt: "prompt" or "directory".
# The two sets are independent and intentionally not merged.
source = "prompt"

[doctors.prompt]
"eye problem" = {{ name = "Robin Kahn", phone = "8646530986" }}
"cold" = {{ name = "Sam Keatings", phone = "0098643209" }}

[doctors.directory]
"Eye" = {{ name = "Robin Kahn", phone = "8762037849" }}
"Cold and Headache" = {{ name = "Sam keatings", phone = "986394809" }}
"#,
        provider_type = provider_type,
        api_key_env = provider.default_api_key_env(),
        api_base = provider.default_api_base(),
        model = provider.default_model(),
    )
}

fn generate_env_example(provider: ProviderKind) -> String {
    format!(
        "# Completion provider API key\n{}=\n\n# Log filter (overrides server.log_level)\n# RUST_LOG=info\n",
        provider.default_api_key_env()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doctors::{default_directory, default_prompt_referrals};
    use crate::utils::config::HealthbotConfig;
    use tempfile::TempDir;

    fn init_config(temp_dir: &TempDir, force: bool) -> InitConfig {
        InitConfig {
            path: temp_dir.path().to_path_buf(),
            force,
            provider: ProviderKind::Groq,
        }
    }

    #[test]
    fn test_generated_toml_matches_defaults() {
        let config = HealthbotConfig::from_toml_str(&generate_healthbot_toml(ProviderKind::Groq))
            .expect("generated config parses");

        assert_eq!(config.provider.kind, ProviderKind::Groq);
        assert_eq!(config.provider.api_key_env(), "Groq_api_key");
        assert_eq!(config.doctors.prompt, default_prompt_referrals());
        assert_eq!(config.doctors.directory, default_directory());
    }

    #[test]
    fn test_generated_toml_for_openai() {
        let config =
            HealthbotConfig::from_toml_str(&generate_healthbot_toml(ProviderKind::OpenAI))
                .expect("generated config parses");

        assert_eq!(config.provider.kind, ProviderKind::OpenAI);
        assert_eq!(config.provider.api_base(), "https://api.openai.com/v1");
        assert!(generate_env_example(ProviderKind::OpenAI).contains("OPENAI_API_KEY="));
    }

    #[test]
    fn test_run_creates_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let result = run(init_config(&temp_dir, false), &Output::no_color());

        assert_eq!(result, InitResult::Success);
        assert!(temp_dir.path().join("healthbot.toml").exists());
        assert!(temp_dir.path().join(".env.example").exists());
    }

    #[test]
    fn test_run_already_exists_without_force() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("healthbot.toml");
        fs::write(&config_path, "# mine").expect("Failed to write");

        let result = run(init_config(&temp_dir, false), &Output::no_color());

        assert_eq!(result, InitResult::AlreadyExists);
        let content = fs::read_to_string(&config_path).expect("Failed to read file");
        assert_eq!(content, "# mine");
    }

    #[test]
    fn test_run_force_overwrites() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("healthbot.toml");
        fs::write(&config_path, "# mine").expect("Failed to write");

        let result = run(init_config(&temp_dir, true), &Output::no_color());

        assert_eq!(result, InitResult::Success);
        let content = fs::read_to_string(&config_path).expect("Failed to read file");
        assert!(content.contains("[provider]"));
    }
}
