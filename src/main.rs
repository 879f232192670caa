use anyhow::Context;
use healthbot::{
    api::routes::build_app,
    cli::{
        init::{self, InitConfig, InitResult},
        output::Output,
        Cli, Commands,
    },
    utils::config::{HealthbotConfig, LogFormat},
    AppState,
};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let Cli {
        config,
        verbose,
        no_color,
        command,
    } = Cli::parse_args();
    let output = if no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => serve(&config, verbose, host, port).await,
        Commands::Init {
            path,
            force,
            provider,
        } => match init::run(
            InitConfig {
                path,
                force,
                provider,
            },
            &output,
        ) {
            InitResult::Success | InitResult::AlreadyExists => Ok(()),
            InitResult::Error(e) => anyhow::bail!(e),
        },
        Commands::Config { validate } => show_config(&config, validate, &output),
    }
}

async fn serve(
    config_path: &Path,
    verbose: bool,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let (mut config, from_file) = HealthbotConfig::load_or_default(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    init_tracing(&config, verbose);

    if from_file {
        info!(path = %config_path.display(), "Loaded configuration");
    } else {
        warn!(path = %config_path.display(), "Configuration file not found, using defaults");
    }

    if config.api_key().is_none() {
        warn!(
            env = config.provider.api_key_env(),
            "API key variable is not set; completions will fail until it is"
        );
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(
        provider = ?config.provider.kind,
        model = config.provider.model(),
        memory_scope = config.memory.scope.as_str(),
        referral_source = ?config.doctors.source,
        "Starting HealthBot"
    );

    let state = AppState::from_config(config)?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &HealthbotConfig, verbose: bool) {
    let default_filter = if verbose {
        "debug".to_string()
    } else {
        config.server.log_level.clone()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(filter);
    match config.server.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn show_config(config_path: &Path, validate: bool, output: &Output) -> anyhow::Result<()> {
    let (config, from_file) = match HealthbotConfig::load_or_default(config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            output.error(&e.to_string());
            return Err(e.into());
        }
    };

    if !from_file {
        output.warning(&format!(
            "{} not found, showing defaults",
            config_path.display()
        ));
    }

    if validate {
        output.success("Configuration is valid");
        return Ok(());
    }

    output.config_summary(&config);
    println!("{}", config.to_toml_string()?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
