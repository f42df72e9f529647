//! List horizons command.

use anyhow::Result;
use scoring_config::AppConfig;
use scoring_horizons::HorizonRegistry;

pub async fn run(config: &AppConfig) -> Result<()> {
    let registry = HorizonRegistry::new();
    let weights = &config.engine.weights;

    println!("Trading Horizons");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    for info in registry.list() {
        println!(
            "  {} ({}), weight {:.2}",
            info.name,
            info.holding_period,
            weights.get(info.horizon)
        );
        println!("  ───────────────────────────────────────────────────────");
        println!("  {}", info.description);
        println!("  Reads: {}", info.requires.join(", "));
        println!("  Defaults: {}", info.default_config);
        println!();
    }

    println!(
        "Order book weight: {:.2}  Thresholds: strong {:.2}, weak {:.2}",
        config.engine.order_book.weight,
        config.engine.thresholds.strong,
        config.engine.thresholds.weak
    );

    Ok(())
}
