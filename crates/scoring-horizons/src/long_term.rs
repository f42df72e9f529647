//! Long-term horizon: slope of the long EMA.

use scoring_core::{
    Horizon, HorizonConfig, HorizonScore, HorizonStrategy, IndicatorResult, ScoringError,
};
use serde::{Deserialize, Serialize};

use crate::{required, scaled};

/// Configuration for the long-term horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LongTermConfig {
    /// EMA slope, in percent, that saturates the score
    pub slope_scale_pct: f64,
    /// Confidence of a saturated slope
    pub max_confidence: f64,
    /// ATR as percent of price above which volatility is flagged
    pub high_volatility_pct: f64,
}

impl Default for LongTermConfig {
    fn default() -> Self {
        Self {
            slope_scale_pct: 5.0,
            max_confidence: 0.6,
            high_volatility_pct: 5.0,
        }
    }
}

impl HorizonConfig for LongTermConfig {
    fn validate(&self) -> Result<(), ScoringError> {
        if !(self.slope_scale_pct.is_finite() && self.slope_scale_pct > 0.0) {
            return Err(ScoringError::Config(
                "long: slope_scale_pct must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.max_confidence) {
            return Err(ScoringError::Config(
                "long: max_confidence must be between 0 and 1".into(),
            ));
        }
        if !(self.high_volatility_pct.is_finite() && self.high_volatility_pct > 0.0) {
            return Err(ScoringError::Config(
                "long: high_volatility_pct must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Long EMA direction on the 1+ month horizon.
#[derive(Debug, Clone, Default)]
pub struct LongTermStrategy {
    config: LongTermConfig,
}

impl LongTermStrategy {
    pub fn new(config: LongTermConfig) -> Self {
        Self { config }
    }

    fn evaluate(&self, indicators: &IndicatorResult) -> Result<HorizonScore, String> {
        let cfg = &self.config;
        let slope = required(&indicators.ema_slope_pct)?;

        let strength = scaled(slope, cfg.slope_scale_pct);
        let confidence = cfg.max_confidence * (0.5 + 0.5 * strength.abs());

        let mut reasons = vec![if slope > 0.0 {
            format!("Long EMA rising ({slope:+.2}%)")
        } else if slope < 0.0 {
            format!("Long EMA falling ({slope:+.2}%)")
        } else {
            "Long EMA flat".to_string()
        }];
        if let Some(atr_pct) = indicators.atr_pct() {
            if atr_pct > cfg.high_volatility_pct {
                reasons.push(format!("High volatility (ATR {atr_pct:.2}% of price)"));
            }
        }

        Ok(HorizonScore::new(Horizon::Long, strength, confidence, reasons))
    }
}

impl HorizonStrategy for LongTermStrategy {
    fn horizon(&self) -> Horizon {
        Horizon::Long
    }

    fn name(&self) -> &str {
        "Long term"
    }

    fn score(&self, indicators: &IndicatorResult) -> HorizonScore {
        self.evaluate(indicators)
            .unwrap_or_else(|reason| HorizonScore::unavailable(Horizon::Long, reason))
    }

    fn required_indicators(&self) -> &'static [&'static str] {
        &["ema_slope"]
    }

    fn description(&self) -> &str {
        "Slope of the long EMA over 1+ months"
    }
}
