//! Scan command implementation.

use anyhow::{Context, Result};
use scoring_config::AppConfig;
use scoring_core::AssetSignal;
use scoring_data::{discover_assets, load_csv, load_order_book, AssetFiles};
use scoring_engine::{Alert, AlertChecker, EvaluateOptions, SignalReport, StrategyEngine};
use scoring_monitor::notify_alerts;
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::cli::output::print_alerts;
use crate::cli::{OutputFormat, ScanArgs};

#[derive(Serialize)]
struct Failure {
    asset_id: String,
    error: String,
}

#[derive(Serialize)]
struct ScanOutput<'a> {
    report: &'a SignalReport,
    alerts: &'a [Alert],
    failures: &'a [Failure],
}

pub async fn run(args: ScanArgs, config: AppConfig) -> Result<()> {
    let mut assets = discover_assets(&args.data)
        .with_context(|| format!("Failed to read data directory {}", args.data.display()))?;
    if !args.assets.is_empty() {
        assets.retain(|a| {
            args.assets
                .iter()
                .any(|wanted| wanted.eq_ignore_ascii_case(&a.asset_id))
        });
    }
    if assets.is_empty() {
        anyhow::bail!(
            "No price files found in '{}' (expected <asset>.csv)",
            args.data.display()
        );
    }

    info!(assets = assets.len(), "Starting scan");

    let config = Arc::new(config);
    let engine = Arc::new(
        StrategyEngine::new(config.engine.clone()).context("Failed to create strategy engine")?,
    );

    let mut tasks = JoinSet::new();
    for files in assets {
        let engine = Arc::clone(&engine);
        let config = Arc::clone(&config);
        tasks.spawn_blocking(move || {
            let asset_id = files.asset_id.clone();
            (asset_id, evaluate_asset(&engine, &config, &files))
        });
    }

    let mut signals = Vec::new();
    let mut alerts = Vec::new();
    let mut failures = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (asset_id, result) = joined.context("Evaluation task panicked")?;
        match result {
            Ok((signal, asset_alerts)) => {
                signals.push(signal);
                alerts.extend(asset_alerts);
            }
            Err(e) => {
                error!(asset = %asset_id, error = %format!("{e:#}"), "Evaluation failed");
                failures.push(Failure {
                    asset_id,
                    error: format!("{e:#}"),
                });
            }
        }
    }

    if signals.is_empty() {
        anyhow::bail!("Every asset failed to evaluate");
    }
    failures.sort_by(|a, b| a.asset_id.cmp(&b.asset_id));

    let report = SignalReport::build(signals);
    let summary = notify_alerts(&alerts);
    info!(
        evaluated = report.ranked.len(),
        failed = failures.len(),
        alerts = summary.total,
        "Scan complete"
    );

    match args.output {
        OutputFormat::Json => {
            let output = ScanOutput {
                report: &report,
                alerts: &alerts,
                failures: &failures,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            print!("{}", report.render_text());
            print_alerts(&alerts);
            if !failures.is_empty() {
                println!();
                for failure in &failures {
                    println!("  {} failed: {}", failure.asset_id, failure.error);
                }
            }
        }
    }

    Ok(())
}

fn evaluate_asset(
    engine: &StrategyEngine,
    config: &AppConfig,
    files: &AssetFiles,
) -> Result<(AssetSignal, Vec<Alert>)> {
    let settings = config.asset_or_default(&files.asset_id);

    let series = load_csv(&files.prices)
        .with_context(|| format!("Failed to load {}", files.prices.display()))?;
    let order_book = files
        .order_book
        .as_ref()
        .map(|path| {
            load_order_book(path).with_context(|| format!("Failed to load {}", path.display()))
        })
        .transpose()?;

    let options = EvaluateOptions {
        weights: settings.weight_overrides(),
        require_order_book: settings.require_order_book,
    };
    let signal = engine.evaluate_with(
        &files.asset_id,
        &series,
        &series.volumes(),
        order_book.as_ref(),
        options,
    )?;

    let alerts = AlertChecker::new().check(&series, &signal, &settings.alerts);
    Ok((signal, alerts))
}
