//! Order book signal configuration.

use scoring_core::ScoringError;
use serde::{Deserialize, Serialize};

/// Configuration for the order book signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrderBookConfig {
    /// Levels per side included in imbalance, walls and liquidity
    pub depth_levels: usize,
    /// A level is a wall when its size exceeds this multiple of the mean level size
    pub wall_multiple: f64,
    /// Band around mid, in percent, counted as near liquidity
    pub liquidity_band_pct: f64,
    /// Signal shift per side that has at least one wall
    pub wall_influence: f64,
    /// Liquidity score below which the book is reported as thin
    pub thin_liquidity: f64,
    /// Share of the final score given to the order book signal
    pub weight: f64,
    /// Fail evaluation when no snapshot is supplied
    pub required: bool,
}

impl Default for OrderBookConfig {
    fn default() -> Self {
        Self {
            depth_levels: 10,
            wall_multiple: 3.0,
            liquidity_band_pct: 1.0,
            wall_influence: 0.2,
            thin_liquidity: 0.25,
            weight: 0.2,
            required: false,
        }
    }
}

impl OrderBookConfig {
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.depth_levels == 0 {
            return Err(ScoringError::Config(
                "order_book.depth_levels must be at least 1".into(),
            ));
        }
        if !(self.wall_multiple.is_finite() && self.wall_multiple > 1.0) {
            return Err(ScoringError::Config(
                "order_book.wall_multiple must be greater than 1".into(),
            ));
        }
        if !(self.liquidity_band_pct.is_finite() && self.liquidity_band_pct > 0.0) {
            return Err(ScoringError::Config(
                "order_book.liquidity_band_pct must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.wall_influence) {
            return Err(ScoringError::Config(
                "order_book.wall_influence must be between 0 and 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.thin_liquidity) {
            return Err(ScoringError::Config(
                "order_book.thin_liquidity must be between 0 and 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.weight) {
            return Err(ScoringError::Config(format!(
                "order_book.weight must be between 0 and 1, got {}",
                self.weight
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(OrderBookConfig::default().validate().is_ok());
    }

    #[test]
    fn test_weight_out_of_range() {
        let config = OrderBookConfig {
            weight: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ScoringError::Config(_))));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let parsed: Result<OrderBookConfig, _> =
            serde_json::from_str(r#"{ "weight": 0.1, "wieght": 0.3 }"#);
        assert!(parsed.is_err());

        let parsed: OrderBookConfig = serde_json::from_str(r#"{ "weight": 0.1 }"#).unwrap();
        assert_eq!(parsed.weight, 0.1);
        assert_eq!(parsed.depth_levels, 10);
    }
}
