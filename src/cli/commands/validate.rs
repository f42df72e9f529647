//! Validate configuration command.

use anyhow::{Context, Result};
use scoring_config::load_config;
use std::path::Path;

use crate::cli::ValidateArgs;

pub async fn run(args: &ValidateArgs, config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };
    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    let w = &config.engine.weights;
    println!(
        "Horizon weights: intraday {}, short {}, medium {}, long {}",
        w.intraday, w.short, w.medium, w.long
    );
    println!("Order book weight: {}", config.engine.order_book.weight);
    println!("Assets configured: {}", config.assets.len());
    for (id, asset) in &config.assets {
        println!(
            "  {} ({}){}",
            id,
            asset.kind,
            asset.name.as_deref().map(|n| format!(" {n}")).unwrap_or_default()
        );
    }

    if args.show {
        println!();
        print!(
            "{}",
            config.to_toml().context("Failed to render configuration")?
        );
    }

    Ok(())
}
