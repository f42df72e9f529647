//! Text rendering shared by the commands.

use scoring_core::{AssetSignal, Direction, IndicatorResult};
use scoring_engine::Alert;
use scoring_monitor::alert_line;

/// Print one signal with its horizon breakdown and rationale.
pub fn print_signal(signal: &AssetSignal) {
    println!("{} @ {}", signal.asset_id, signal.timestamp.format("%Y-%m-%d %H:%M"));
    println!("═══════════════════════════════════════════════════════════");
    println!(
        "  Score: {:+.3}   Classification: {}   Agreement: {}",
        signal.final_score, signal.classification, signal.agreement
    );
    println!();

    for score in &signal.horizon_scores {
        if score.is_contributing() {
            println!(
                "  {:<9} {:<7} strength {:+.2}  confidence {:.2}",
                score.horizon.to_string(),
                score.direction.to_string(),
                score.strength,
                score.confidence
            );
        } else {
            let reason = score.reasons.first().map(String::as_str).unwrap_or("");
            println!("  {:<9} unavailable ({reason})", score.horizon.to_string());
        }
    }
    if signal.order_book.is_some() {
        println!("  order book contribution {:+.3}", signal.order_book_contribution);
    }

    if !signal.rationale.is_empty() {
        println!();
        println!("  Rationale");
        println!("  ───────────────────────────────────────────────────────");
        for reason in &signal.rationale {
            println!("  - {reason}");
        }
    }
}

/// Print the indicator values and the vote each one casts.
pub fn print_indicators(indicators: &IndicatorResult) {
    println!();
    println!("  Indicators");
    println!("  ───────────────────────────────────────────────────────");
    for (name, value) in indicators.values() {
        println!("  {name:<16} {value:>12.4}");
    }

    let votes = indicators.votes();
    if !votes.is_empty() {
        let cast: Vec<String> = votes
            .iter()
            .filter(|(_, d)| **d != Direction::Neutral)
            .map(|(name, d)| format!("{name} {d}"))
            .collect();
        println!();
        println!(
            "  Consensus: {} ({})",
            indicators.consensus(),
            if cast.is_empty() {
                "no votes".to_string()
            } else {
                cast.join(", ")
            }
        );
    }
}

pub fn print_alerts(alerts: &[Alert]) {
    if alerts.is_empty() {
        return;
    }
    println!();
    println!("  Alerts");
    println!("  ───────────────────────────────────────────────────────");
    for alert in alerts {
        println!("  {}", alert_line(alert));
    }
}
