//! Strategy performance accounting CLI.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use perf_config::{load_config, AppConfig};
use perf_monitor::{setup_logging, LogFormat};
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // validate-config reads the file itself to report every section
    let validate_only = matches!(cli.command, Commands::ValidateConfig);

    let (config, missing) = if validate_only {
        (AppConfig::default(), false)
    } else if cli.config.exists() {
        let config = load_config(&cli.config)
            .with_context(|| format!("Failed to load {}", cli.config.display()))?;
        (config, false)
    } else {
        (AppConfig::default(), true)
    };

    // Setup logging
    let log_level = match cli.log_level {
        Some(level) => level.as_str().to_string(),
        None => config.logging.level.clone(),
    };
    let format = if cli.json_logs || config.logging.is_json() {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    setup_logging(&log_level, format).context("Failed to install logger")?;

    if missing {
        warn!(path = %cli.config.display(), "Config file not found, using defaults");
    }

    // Execute command
    match cli.command {
        Commands::Replay(args) => cli::commands::replay::run(args, &config).await,
        Commands::Modes => cli::commands::modes::run().await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
    }
}
