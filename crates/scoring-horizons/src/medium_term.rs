//! Medium-term horizon.
//!
//! Combines the fast/slow SMA trend with the distance of the close from
//! rolling support and resistance. OBV raises confidence when it moves
//! with the score.

use scoring_core::{
    Horizon, HorizonConfig, HorizonScore, HorizonStrategy, IndicatorResult, ScoringError,
};
use serde::{Deserialize, Serialize};

use crate::{required, scaled};

/// Configuration for the medium-term horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediumTermConfig {
    /// SMA spread, in percent, that saturates the trend component
    pub trend_scale_pct: f64,
    /// Distance from a level, in percent, inside which the level matters
    pub proximity_pct: f64,
    pub trend_weight: f64,
    pub levels_weight: f64,
    pub base_confidence: f64,
    pub obv_confirmation_boost: f64,
}

impl Default for MediumTermConfig {
    fn default() -> Self {
        Self {
            trend_scale_pct: 5.0,
            proximity_pct: 2.0,
            trend_weight: 0.6,
            levels_weight: 0.4,
            base_confidence: 0.7,
            obv_confirmation_boost: 0.1,
        }
    }
}

impl HorizonConfig for MediumTermConfig {
    fn validate(&self) -> Result<(), ScoringError> {
        let positive = |x: f64| x.is_finite() && x > 0.0;
        if !positive(self.trend_scale_pct) || !positive(self.proximity_pct) {
            return Err(ScoringError::Config(
                "medium: trend_scale_pct and proximity_pct must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.trend_weight)
            || !(0.0..=1.0).contains(&self.levels_weight)
            || self.trend_weight + self.levels_weight > 1.0 + 1e-9
        {
            return Err(ScoringError::Config(
                "medium: trend and level weights must be non-negative and sum to at most 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.base_confidence)
            || !(0.0..=1.0).contains(&self.obv_confirmation_boost)
            || self.base_confidence + self.obv_confirmation_boost > 1.0
        {
            return Err(ScoringError::Config(
                "medium: confidence plus OBV boost must stay between 0 and 1".into(),
            ));
        }
        Ok(())
    }
}

/// Trend and support/resistance on the 1-4 week horizon.
#[derive(Debug, Clone, Default)]
pub struct MediumTermStrategy {
    config: MediumTermConfig,
}

impl MediumTermStrategy {
    pub fn new(config: MediumTermConfig) -> Self {
        Self { config }
    }

    /// 1 at the level, falling to 0 at `proximity_pct` away.
    fn closeness(distance_pct: f64, proximity_pct: f64) -> f64 {
        if distance_pct <= proximity_pct {
            1.0 - distance_pct / proximity_pct
        } else {
            0.0
        }
    }

    fn evaluate(&self, indicators: &IndicatorResult) -> Result<HorizonScore, String> {
        let cfg = &self.config;
        let fast = required(&indicators.sma_fast)?;
        let slow = required(&indicators.sma_slow)?;
        let levels = required(&indicators.levels)?;
        let close = indicators.close;

        let spread_pct = if slow != 0.0 {
            (fast - slow) / slow * 100.0
        } else {
            0.0
        };
        let trend = scaled(spread_pct, cfg.trend_scale_pct);

        let distance = |level: f64| {
            if close != 0.0 {
                (close - level).abs() / close * 100.0
            } else {
                0.0
            }
        };
        let support_distance = distance(levels.support);
        let resistance_distance = distance(levels.resistance);
        let near_support = Self::closeness(support_distance, cfg.proximity_pct);
        let near_resistance = Self::closeness(resistance_distance, cfg.proximity_pct);
        let sr = near_support - near_resistance;

        let strength = cfg.trend_weight * trend + cfg.levels_weight * sr;

        let mut reasons = Vec::with_capacity(4);
        reasons.push(if spread_pct > 0.0 {
            format!("Uptrend: fast SMA {spread_pct:.2}% above slow SMA")
        } else if spread_pct < 0.0 {
            format!("Downtrend: fast SMA {:.2}% below slow SMA", -spread_pct)
        } else {
            "No trend: fast and slow SMA level".to_string()
        });
        if near_support > 0.0 && near_support >= near_resistance {
            reasons.push(format!(
                "Price near support {:.2} ({support_distance:.2}% away)",
                levels.support
            ));
        }
        if near_resistance > 0.0 && near_resistance >= near_support {
            reasons.push(format!(
                "Price near resistance {:.2} ({resistance_distance:.2}% away)",
                levels.resistance
            ));
        }

        let mut confidence = cfg.base_confidence;
        if let Some(obv) = indicators.obv.value() {
            let agrees = (strength > 0.0 && obv.change > 0.0) || (strength < 0.0 && obv.change < 0.0);
            if agrees {
                confidence += cfg.obv_confirmation_boost;
                reasons.push("Volume confirms the move (OBV)".to_string());
            }
        }

        Ok(HorizonScore::new(Horizon::Medium, strength, confidence, reasons))
    }
}

impl HorizonStrategy for MediumTermStrategy {
    fn horizon(&self) -> Horizon {
        Horizon::Medium
    }

    fn name(&self) -> &str {
        "Medium term"
    }

    fn score(&self, indicators: &IndicatorResult) -> HorizonScore {
        self.evaluate(indicators)
            .unwrap_or_else(|reason| HorizonScore::unavailable(Horizon::Medium, reason))
    }

    fn required_indicators(&self) -> &'static [&'static str] {
        &["sma_fast", "sma_slow", "support_resistance"]
    }

    fn description(&self) -> &str {
        "SMA trend and support/resistance proximity over 1-4 weeks"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::empty;
    use scoring_core::{Direction, ObvState, Reading, SupportResistance};

    fn snapshot(close: f64, fast: f64, slow: f64, support: f64, resistance: f64) -> IndicatorResult {
        let mut result = empty(close);
        result.sma_fast = Reading::Available(fast);
        result.sma_slow = Reading::Available(slow);
        result.levels = Reading::Available(SupportResistance {
            support,
            resistance,
        });
        result
    }

    #[test]
    fn test_uptrend_far_from_levels() {
        // Spread 2.5% -> trend 0.5; levels more than 2% away
        let score = MediumTermStrategy::default().score(&snapshot(100.0, 102.5, 100.0, 90.0, 110.0));

        assert!((score.strength - 0.3).abs() < 1e-10);
        assert_eq!(score.confidence, 0.7);
        assert_eq!(score.direction, Direction::Buy);
    }

    #[test]
    fn test_near_support() {
        // 1% above support -> closeness 0.5
        let score = MediumTermStrategy::default().score(&snapshot(100.0, 100.0, 100.0, 99.0, 120.0));

        assert!((score.strength - 0.2).abs() < 1e-10);
        assert!(score.reasons.iter().any(|r| r.starts_with("Price near support")));
    }

    #[test]
    fn test_near_resistance_in_downtrend() {
        let score = MediumTermStrategy::default().score(&snapshot(100.0, 95.0, 100.0, 80.0, 100.0));

        // trend -1 * 0.6, resistance closeness 1 * 0.4
        assert!((score.strength - (-1.0)).abs() < 1e-10);
        assert_eq!(score.direction, Direction::Sell);
    }

    #[test]
    fn test_flat_range_cancels() {
        let score = MediumTermStrategy::default().score(&snapshot(100.0, 100.0, 100.0, 100.0, 100.0));
        assert_eq!(score.strength, 0.0);
        assert_eq!(score.direction, Direction::Neutral);
    }

    #[test]
    fn test_obv_confirmation() {
        let mut indicators = snapshot(100.0, 102.5, 100.0, 90.0, 110.0);
        indicators.obv = Reading::Available(ObvState {
            value: 5_000.0,
            change: 1_200.0,
        });

        let score = MediumTermStrategy::default().score(&indicators);
        assert!((score.confidence - 0.8).abs() < 1e-10);

        indicators.obv = Reading::Available(ObvState {
            value: 5_000.0,
            change: -1_200.0,
        });
        let score = MediumTermStrategy::default().score(&indicators);
        assert_eq!(score.confidence, 0.7);
    }

    #[test]
    fn test_missing_slow_sma() {
        let mut indicators = snapshot(100.0, 102.5, 100.0, 90.0, 110.0);
        indicators.sma_slow = crate::testing::missing();

        let score = MediumTermStrategy::default().score(&indicators);
        assert!(!score.is_contributing());
    }

    #[test]
    fn test_config_validation() {
        assert!(MediumTermConfig::default().validate().is_ok());

        let nan_scale = MediumTermConfig {
            proximity_pct: f64::NAN,
            ..Default::default()
        };
        assert!(nan_scale.validate().is_err());

        let nan_weight = MediumTermConfig {
            levels_weight: f64::NAN,
            ..Default::default()
        };
        assert!(nan_weight.validate().is_err());

        let nan_boost = MediumTermConfig {
            obv_confirmation_boost: f64::NAN,
            ..Default::default()
        };
        assert!(nan_boost.validate().is_err());
    }
}
