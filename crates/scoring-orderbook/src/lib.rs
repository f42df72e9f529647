//! Order book signal.
//!
//! Turns a bid/ask depth snapshot into a directional signal in [-1, 1]
//! from three measurements:
//! - imbalance between bid and ask depth over the top levels
//! - walls, single levels much larger than the rest of the book
//! - liquidity, the share of depth sitting close to the mid price

pub mod analyzer;
pub mod config;

pub use analyzer::{detect_walls, imbalance, liquidity_score, OrderBookAnalyzer};
pub use config::OrderBookConfig;
