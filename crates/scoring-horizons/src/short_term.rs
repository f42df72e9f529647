//! Short-term horizon: MACD direction plus rate-of-change momentum.

use scoring_core::{
    Horizon, HorizonConfig, HorizonScore, HorizonStrategy, IndicatorResult, ScoringError,
};
use serde::{Deserialize, Serialize};

use crate::{required, scaled};

/// Configuration for the short-term horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShortTermConfig {
    /// Rate of change, in percent, that saturates the momentum component
    pub momentum_scale_pct: f64,
    pub base_confidence: f64,
    /// Added to confidence after a recent MACD crossover
    pub crossover_boost: f64,
    /// A crossover fewer than this many bars ago counts as recent
    pub crossover_lookback: usize,
}

impl Default for ShortTermConfig {
    fn default() -> Self {
        Self {
            momentum_scale_pct: 5.0,
            base_confidence: 0.6,
            crossover_boost: 0.3,
            crossover_lookback: 3,
        }
    }
}

impl HorizonConfig for ShortTermConfig {
    fn validate(&self) -> Result<(), ScoringError> {
        if !(self.momentum_scale_pct.is_finite() && self.momentum_scale_pct > 0.0) {
            return Err(ScoringError::Config(
                "short: momentum_scale_pct must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.base_confidence)
            || !(0.0..=1.0).contains(&(self.base_confidence + self.crossover_boost))
            || self.crossover_boost < 0.0
        {
            return Err(ScoringError::Config(
                "short: confidence plus crossover boost must stay between 0 and 1".into(),
            ));
        }
        Ok(())
    }
}

/// MACD and momentum on the 1-5 day horizon.
#[derive(Debug, Clone, Default)]
pub struct ShortTermStrategy {
    config: ShortTermConfig,
}

impl ShortTermStrategy {
    pub fn new(config: ShortTermConfig) -> Self {
        Self { config }
    }

    fn evaluate(&self, indicators: &IndicatorResult) -> Result<HorizonScore, String> {
        let cfg = &self.config;
        let macd = required(&indicators.macd)?;
        let momentum = required(&indicators.momentum_pct)?;

        let histogram = macd.latest.histogram;
        let macd_component = if histogram > 0.0 {
            1.0
        } else if histogram < 0.0 {
            -1.0
        } else {
            0.0
        };
        let momentum_component = scaled(momentum, cfg.momentum_scale_pct);
        let strength = (macd_component + momentum_component) / 2.0;

        let mut reasons = Vec::with_capacity(3);
        reasons.push(if histogram > 0.0 {
            format!("MACD above signal line (histogram {histogram:+.4})")
        } else if histogram < 0.0 {
            format!("MACD below signal line (histogram {histogram:+.4})")
        } else {
            "MACD on signal line".to_string()
        });
        reasons.push(format!("Momentum {momentum:+.2}%"));

        let mut confidence = cfg.base_confidence;
        if let Some(crossover) = macd.last_crossover {
            if crossover.bars_ago < cfg.crossover_lookback {
                confidence += cfg.crossover_boost;
                let kind = if crossover.bullish { "Bullish" } else { "Bearish" };
                reasons.push(format!(
                    "{kind} MACD crossover {} bar(s) ago",
                    crossover.bars_ago
                ));
            }
        }

        Ok(HorizonScore::new(Horizon::Short, strength, confidence, reasons))
    }
}

impl HorizonStrategy for ShortTermStrategy {
    fn horizon(&self) -> Horizon {
        Horizon::Short
    }

    fn name(&self) -> &str {
        "Short term"
    }

    fn score(&self, indicators: &IndicatorResult) -> HorizonScore {
        self.evaluate(indicators)
            .unwrap_or_else(|reason| HorizonScore::unavailable(Horizon::Short, reason))
    }

    fn required_indicators(&self) -> &'static [&'static str] {
        &["macd", "momentum"]
    }

    fn description(&self) -> &str {
        "MACD histogram direction and rate-of-change momentum over 1-5 days"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::empty;
    use scoring_core::{Crossover, Direction, MacdOutput, MacdState, Reading};

    fn snapshot(histogram: f64, momentum: f64, crossover: Option<Crossover>) -> IndicatorResult {
        let mut result = empty(100.0);
        result.macd = Reading::Available(MacdState {
            latest: MacdOutput {
                macd: 1.0,
                signal: 1.0 - histogram,
                histogram,
            },
            last_crossover: crossover,
        });
        result.momentum_pct = Reading::Available(momentum);
        result
    }

    #[test]
    fn test_bullish_macd_and_momentum() {
        let score = ShortTermStrategy::default().score(&snapshot(0.5, 2.5, None));

        // (1 + 0.5) / 2
        assert!((score.strength - 0.75).abs() < 1e-10);
        assert_eq!(score.confidence, 0.6);
        assert_eq!(score.direction, Direction::Buy);
    }

    #[test]
    fn test_momentum_saturates() {
        let score = ShortTermStrategy::default().score(&snapshot(-0.2, -40.0, None));
        assert_eq!(score.strength, -1.0);
    }

    #[test]
    fn test_recent_crossover_boosts_confidence() {
        let recent = Crossover {
            bullish: true,
            bars_ago: 2,
        };
        let score = ShortTermStrategy::default().score(&snapshot(0.5, 1.0, Some(recent)));
        assert!((score.confidence - 0.9).abs() < 1e-10);
        assert!(score.reasons.iter().any(|r| r.contains("Bullish MACD crossover")));

        let stale = Crossover {
            bullish: true,
            bars_ago: 3,
        };
        let score = ShortTermStrategy::default().score(&snapshot(0.5, 1.0, Some(stale)));
        assert_eq!(score.confidence, 0.6);
    }

    #[test]
    fn test_flat_market_is_neutral() {
        let score = ShortTermStrategy::default().score(&snapshot(0.0, 0.0, None));
        assert_eq!(score.strength, 0.0);
        assert_eq!(score.direction, Direction::Neutral);
    }

    #[test]
    fn test_missing_macd() {
        let mut indicators = empty(100.0);
        indicators.momentum_pct = Reading::Available(3.0);

        let score = ShortTermStrategy::default().score(&indicators);
        assert_eq!(score.confidence, 0.0);
        assert!(!score.is_contributing());
    }

    #[test]
    fn test_config_validation() {
        assert!(ShortTermConfig::default().validate().is_ok());

        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = ShortTermConfig {
                momentum_scale_pct: scale,
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }
    }
}
