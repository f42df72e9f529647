//! Multi-asset signal report.

use scoring_core::{AssetSignal, Classification};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Assets listed per strong-signal section.
const TOP_N: usize = 5;

/// Ranked view over a batch of signals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalReport {
    /// All signals, best score first
    pub ranked: Vec<AssetSignal>,
    /// Strongest buys, at most five
    pub strong_buys: Vec<String>,
    /// Strongest sells, at most five
    pub strong_sells: Vec<String>,
}

impl SignalReport {
    pub fn build(mut signals: Vec<AssetSignal>) -> Self {
        // Ties broken by asset id so the order is stable across runs
        signals.sort_by(|a, b| {
            b.final_score
                .total_cmp(&a.final_score)
                .then_with(|| a.asset_id.cmp(&b.asset_id))
        });

        let strong_buys = signals
            .iter()
            .filter(|s| s.classification == Classification::StrongBuy)
            .take(TOP_N)
            .map(|s| s.asset_id.clone())
            .collect();
        let strong_sells = signals
            .iter()
            .rev()
            .filter(|s| s.classification == Classification::StrongSell)
            .take(TOP_N)
            .map(|s| s.asset_id.clone())
            .collect();

        Self {
            ranked: signals,
            strong_buys,
            strong_sells,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Plain-text summary, one block per asset.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Signal report: {} asset(s)", self.ranked.len());

        if !self.strong_buys.is_empty() {
            let _ = writeln!(out, "Strong buys: {}", self.strong_buys.join(", "));
        }
        if !self.strong_sells.is_empty() {
            let _ = writeln!(out, "Strong sells: {}", self.strong_sells.join(", "));
        }

        for signal in &self.ranked {
            let _ = writeln!(
                out,
                "\n{:<10} {:>+.3}  {} (agreement {})",
                signal.asset_id, signal.final_score, signal.classification, signal.agreement
            );
            for score in &signal.horizon_scores {
                if score.is_contributing() {
                    let _ = writeln!(
                        out,
                        "  {:<9} {:<7} strength {:>+.2}  confidence {:.2}",
                        score.horizon.to_string(),
                        score.direction.to_string(),
                        score.strength,
                        score.confidence
                    );
                } else {
                    let _ = writeln!(out, "  {:<9} unavailable", score.horizon.to_string());
                }
            }
            if signal.order_book_contribution != 0.0 {
                let _ = writeln!(
                    out,
                    "  order book contribution {:+.3}",
                    signal.order_book_contribution
                );
            }
        }

        out
    }
}
