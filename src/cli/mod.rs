//! CLI module for the consultation server
//!
//! Provides command-line interface parsing for the healthbot-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod init;
pub mod output;

use crate::utils::config::ProviderKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// HealthBot - symptom consultation server
#[derive(Parser, Debug)]
#[command(
    name = "healthbot-server",
    version,
    about = "HealthBot - symptom consultation server",
    long_about = "HealthBot - symptom consultation server\n\n\
                  Forwards symptom descriptions to an OpenAI-compatible LLM provider (Groq by default)\n\
                  and returns cleaned health advice over HTTP.\n\n\
                  Run without arguments to start the server, or use 'init' to write a config file.",
    after_help = "EXAMPLES:\n    \
                  healthbot-server init                   # Write healthbot.toml and .env.example\n    \
                  healthbot-server                        # Start the server\n    \
                  healthbot-server serve --port 9000      # Start on another port\n    \
                  healthbot-server config --validate      # Check the configuration"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(
        short,
        long,
        default_value = "healthbot.toml",
        env = "HEALTHBOT_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Override server.host
        #[arg(long)]
        host: Option<String>,

        /// Override server.port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Write a commented healthbot.toml and .env.example
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Completion provider to configure
        #[arg(long, value_enum, default_value_t = ProviderKind::Groq)]
        provider: ProviderKind,
    },

    /// Show the effective configuration
    Config {
        /// Only validate, don't print
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["healthbot-server"]).expect("parses");
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("healthbot.toml"));
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from([
            "healthbot-server",
            "--config",
            "custom.toml",
            "serve",
            "--port",
            "9000",
        ])
        .expect("parses");

        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert_eq!(
            cli.command,
            Some(Commands::Serve {
                host: None,
                port: Some(9000)
            })
        );
    }

    #[test]
    fn test_init_provider_values() {
        let cli = Cli::try_parse_from(["healthbot-server", "init", "--provider", "openai"])
            .expect("parses");
        assert!(matches!(
            cli.command,
            Some(Commands::Init {
                provider: ProviderKind::OpenAI,
                ..
            })
        ));

        let cli = Cli::try_parse_from(["healthbot-server", "init"]).expect("parses");
        assert!(matches!(
            cli.command,
            Some(Commands::Init {
                provider: ProviderKind::Groq,
                ..
            })
        ));
    }

    #[test]
    fn test_init_rejects_unknown_provider() {
        let result = Cli::try_parse_from(["healthbot-server", "init", "--provider", "ollama"]);
        assert!(result.is_err());
    }
}
