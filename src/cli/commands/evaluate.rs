//! Evaluate command implementation.

use anyhow::{Context, Result};
use scoring_config::AppConfig;
use scoring_core::{AssetSignal, Direction};
use scoring_data::{asset_id_from_path, load_csv, load_order_book};
use scoring_engine::{Alert, AlertChecker, EvaluateOptions, StrategyEngine};
use scoring_monitor::notify_alerts;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::cli::output::{print_alerts, print_indicators, print_signal};
use crate::cli::{EvaluateArgs, OutputFormat};

#[derive(Serialize)]
struct EvaluateOutput<'a> {
    signal: &'a AssetSignal,
    indicators: BTreeMap<&'static str, f64>,
    votes: BTreeMap<&'static str, Direction>,
    consensus: Direction,
    alerts: &'a [Alert],
}

pub async fn run(args: EvaluateArgs, config: &AppConfig) -> Result<()> {
    let asset_id = args
        .asset
        .clone()
        .or_else(|| asset_id_from_path(&args.data))
        .unwrap_or_else(|| "DATA".to_string());
    let settings = config.asset_or_default(&asset_id);

    let series = load_csv(&args.data)
        .with_context(|| format!("Failed to load price history from {}", args.data.display()))?;
    let order_book = args
        .order_book
        .as_ref()
        .map(|path| {
            load_order_book(path)
                .with_context(|| format!("Failed to load order book from {}", path.display()))
        })
        .transpose()?;

    info!(asset = %asset_id, bars = series.len(), "Evaluating asset");

    let engine =
        StrategyEngine::new(config.engine.clone()).context("Failed to create strategy engine")?;
    if series.len() < engine.warmup_period() {
        info!(
            bars = series.len(),
            warmup = engine.warmup_period(),
            "History shorter than the full warmup, some horizons will be unavailable"
        );
    }

    let volumes = series.volumes();
    let options = EvaluateOptions {
        weights: settings.weight_overrides(),
        require_order_book: settings.require_order_book,
    };
    let signal = engine
        .evaluate_with(&asset_id, &series, &volumes, order_book.as_ref(), options)
        .with_context(|| format!("Failed to evaluate {asset_id}"))?;

    let indicators = scoring_indicators::compute(&series, &volumes, &config.engine.indicators)
        .context("Failed to compute indicators")?;

    let alerts = AlertChecker::new().check(&series, &signal, &settings.alerts);
    notify_alerts(&alerts);

    match args.output {
        OutputFormat::Json => {
            let output = EvaluateOutput {
                signal: &signal,
                indicators: indicators.values(),
                votes: indicators.votes(),
                consensus: indicators.consensus(),
                alerts: &alerts,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            print_signal(&signal);
            print_indicators(&indicators);
            print_alerts(&alerts);
        }
    }

    Ok(())
}
