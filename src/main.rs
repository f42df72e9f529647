//! Signal scoring CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use scoring_config::{load_config, AppConfig};
use scoring_monitor::{setup_logging, setup_logging_with_file};
use std::path::Path;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::ValidateConfig(args) = &cli.command {
        setup_logging(cli.log_level.map_or("warn", |l| l.as_str()), cli.json_logs);
        return cli::commands::validate::run(args, &cli.config).await;
    }

    let (config, loaded) = load_settings(&cli.config)?;

    // Setup logging
    let level = cli
        .log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let json = cli.json_logs || config.logging.is_json();
    let _guard = match &config.logging.file {
        Some(file) => Some(
            setup_logging_with_file(&level, json, Path::new(file))
                .with_context(|| format!("Failed to open log file {file}"))?,
        ),
        None => {
            setup_logging(&level, json);
            None
        }
    };

    if !loaded {
        warn!(
            "Configuration file {} not found, using defaults",
            cli.config.display()
        );
    }

    // Execute command
    match cli.command {
        Commands::Evaluate(args) => cli::commands::evaluate::run(args, &config).await,
        Commands::Scan(args) => cli::commands::scan::run(args, config).await,
        Commands::Horizons => cli::commands::horizons::run(&config).await,
        Commands::ValidateConfig(_) => Ok(()),
    }
}

/// Load and validate the configuration. A missing file means defaults.
fn load_settings(path: &Path) -> Result<(AppConfig, bool)> {
    if !path.exists() {
        return Ok((AppConfig::default(), false));
    }
    let config = load_config(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    Ok((config, true))
}
