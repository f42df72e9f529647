//! Order book analysis.

use scoring_core::{BookLevel, BookSide, OrderBookSignal, OrderBookSnapshot, Wall};
use tracing::debug;

use crate::config::OrderBookConfig;

/// Imbalances smaller than this are described as balanced.
const BALANCED_BAND: f64 = 0.2;

/// Largest level size. Depths are summed in units of it so that sizes
/// near `f64::MAX` cannot overflow to infinity.
fn size_scale<'a>(levels: impl Iterator<Item = &'a BookLevel>) -> f64 {
    levels.map(|l| l.size).fold(0.0, f64::max)
}

fn scaled_depth(levels: &[BookLevel], scale: f64) -> f64 {
    levels.iter().map(|l| l.size / scale).sum()
}

/// Depth imbalance between the two sides.
///
/// `(bid depth - ask depth) / (bid depth + ask depth)` in [-1, 1].
/// Positive means buy pressure, and an empty book reads 0.
pub fn imbalance(bids: &[BookLevel], asks: &[BookLevel]) -> f64 {
    let scale = size_scale(bids.iter().chain(asks));
    if scale == 0.0 {
        return 0.0;
    }
    let bid_depth = scaled_depth(bids, scale);
    let ask_depth = scaled_depth(asks, scale);

    ((bid_depth - ask_depth) / (bid_depth + ask_depth)).clamp(-1.0, 1.0)
}

/// Levels larger than `multiple` times the mean level size of both sides.
pub fn detect_walls(bids: &[BookLevel], asks: &[BookLevel], mid: f64, multiple: f64) -> Vec<Wall> {
    let count = bids.len() + asks.len();
    let scale = size_scale(bids.iter().chain(asks));
    if count == 0 || scale == 0.0 {
        return vec![];
    }
    let mean = (scaled_depth(bids, scale) + scaled_depth(asks, scale)) / count as f64;
    let threshold = mean * multiple;

    let sides = [(BookSide::Bid, bids), (BookSide::Ask, asks)];
    sides
        .into_iter()
        .flat_map(|(side, levels)| {
            levels
                .iter()
                .filter(move |l| l.size / scale > threshold)
                .map(move |l| Wall {
                    side,
                    price: l.price,
                    size: l.size,
                    distance_pct: (l.price - mid).abs() / mid * 100.0,
                })
        })
        .collect()
}

/// Share of depth within `band_pct` percent of mid, in [0, 1].
pub fn liquidity_score(bids: &[BookLevel], asks: &[BookLevel], mid: f64, band_pct: f64) -> f64 {
    let scale = size_scale(bids.iter().chain(asks));
    if scale == 0.0 {
        return 0.0;
    }
    let total = scaled_depth(bids, scale) + scaled_depth(asks, scale);

    let near: f64 = bids
        .iter()
        .chain(asks)
        .filter(|l| (l.price - mid).abs() / mid * 100.0 <= band_pct)
        .map(|l| l.size / scale)
        .sum();

    (near / total).clamp(0.0, 1.0)
}

/// Computes [`OrderBookSignal`]s from snapshots.
#[derive(Debug, Clone, Default)]
pub struct OrderBookAnalyzer {
    config: OrderBookConfig,
}

impl OrderBookAnalyzer {
    pub fn new(config: OrderBookConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OrderBookConfig {
        &self.config
    }

    /// Analyze the top levels of a snapshot.
    pub fn analyze(&self, book: &OrderBookSnapshot) -> OrderBookSignal {
        let depth = self.config.depth_levels;
        let bids = &book.bids()[..book.bids().len().min(depth)];
        let asks = &book.asks()[..book.asks().len().min(depth)];
        let mid = book.mid_price();

        let imbalance = imbalance(bids, asks);
        let walls = detect_walls(bids, asks, mid, self.config.wall_multiple);
        let liquidity = liquidity_score(bids, asks, mid, self.config.liquidity_band_pct);

        let bid_walls = walls.iter().any(|w| w.side == BookSide::Bid);
        let ask_walls = walls.iter().any(|w| w.side == BookSide::Ask);
        let wall_shift = (bid_walls as i8 - ask_walls as i8) as f64 * self.config.wall_influence;
        let signal = (imbalance + wall_shift).clamp(-1.0, 1.0);

        let mut reasons = vec![describe_imbalance(imbalance)];
        for wall in &walls {
            let role = match wall.side {
                BookSide::Bid => "support",
                BookSide::Ask => "resistance",
            };
            reasons.push(format!(
                "Order book: {} wall of {:.2} at {:.4} ({:.2}% from mid) acts as {}",
                wall.side, wall.size, wall.price, wall.distance_pct, role
            ));
        }
        if liquidity < self.config.thin_liquidity {
            reasons.push(format!(
                "Order book: thin liquidity, {:.0}% of depth within {}% of mid",
                liquidity * 100.0,
                self.config.liquidity_band_pct
            ));
        }

        debug!(
            imbalance,
            walls = walls.len(),
            liquidity,
            signal,
            "Analyzed order book"
        );

        OrderBookSignal {
            imbalance,
            walls,
            liquidity,
            signal,
            reasons,
        }
    }
}

fn describe_imbalance(imbalance: f64) -> String {
    let pressure = if imbalance >= BALANCED_BAND {
        "buy pressure"
    } else if imbalance <= -BALANCED_BAND {
        "sell pressure"
    } else {
        "balanced"
    };
    format!("Order book: {pressure} (imbalance {imbalance:+.2})")
}
