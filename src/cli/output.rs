//! Terminal output for the `init` and `config` commands.
//!
//! Colours are dropped with `--no-color`; the plain variants use bracketed tags
//! so the output stays greppable in scripts and tests.

use crate::utils::config::{HealthbotConfig, ProviderKind};
use owo_colors::OwoColorize;

/// Width of the label column in [`Output::setting`] rows.
const LABEL_WIDTH: usize = 16;

pub struct Output {
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self { colored: true }
    }

    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// `HealthBot vX.Y.Z`
    pub fn banner(&self) {
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        if self.colored {
            println!("\n   {} {}\n", "HealthBot".bright_green().bold(), version.dimmed());
        } else {
            println!("\n   HealthBot {}\n", version);
        }
    }

    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Goes to stderr.
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// A file written by `init`, tagged with what it holds.
    pub fn created(&self, kind: &str, file: &str) {
        if self.colored {
            println!("  {} {} {}", "✓".green().bold(), kind.dimmed(), file.bright_white());
        } else {
            println!("  [CREATED] {} {}", kind, file);
        }
    }

    /// A file `init` left alone.
    pub fn skipped(&self, file: &str, reason: &str) {
        if self.colored {
            println!("  {} {} {}", "○".yellow(), file.dimmed(), format!("({})", reason).yellow());
        } else {
            println!("  [SKIPPED] {} ({})", file, reason);
        }
    }

    pub fn section(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  == {} ==", title);
        }
    }

    /// One `label value` row, labels right-aligned.
    pub fn setting(&self, label: &str, value: &str) {
        if self.colored {
            println!("  {:>width$} {}", label.dimmed(), value.bright_white(), width = LABEL_WIDTH);
        } else {
            println!("  {:>width$} {}", label, value, width = LABEL_WIDTH);
        }
    }

    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "→".cyan(), message.dimmed());
        } else {
            println!("  -> {}", message);
        }
    }

    /// A shell command the user can copy.
    pub fn command(&self, cmd: &str) {
        if self.colored {
            println!("    {} {}", "$".dimmed(), cmd.bright_cyan());
        } else {
            println!("    $ {}", cmd);
        }
    }

    /// The settings that decide how a consultation behaves.
    ///
    /// The API key is reported as set or missing, never printed.
    pub fn config_summary(&self, config: &HealthbotConfig) {
        let provider = &config.provider;
        let key_state = if config.api_key().is_some() { "set" } else { "missing" };

        self.section("Effective configuration");
        self.setting("listen", &format!("{}:{}", config.server.host, config.server.port));
        self.setting("provider", &format!("{:?}", provider.kind));
        self.setting("api base", provider.api_base());
        self.setting("model", provider.model());
        self.setting(
            "api key",
            &format!("{} ({})", key_state, provider.api_key_env()),
        );
        self.setting("timeout", &format!("{}s", provider.timeout_secs));
        self.setting("memory scope", config.memory.scope.as_str());
        self.setting(
            "history window",
            &format!("{} messages", config.memory.max_messages),
        );
        self.setting("referrals", &format!("{:?}", config.doctors.source).to_lowercase());
        println!();
    }

    /// What to do after `init` wrote the files.
    pub fn next_steps(&self, provider: ProviderKind) {
        self.section("Next Steps");
        self.hint(&format!("Set {} in .env", provider.default_api_key_env()));
        self.command("cp .env.example .env");
        self.hint("Start the server");
        self.command("healthbot-server");
        println!();
    }
}
