//! Intraday horizon.
//!
//! Reads RSI and Stochastic %K for oversold/overbought extremes.
//! Bollinger band touches and high ATR are reported but do not move
//! the score.

use scoring_core::{
    Horizon, HorizonConfig, HorizonScore, HorizonStrategy, IndicatorResult, ScoringError,
};
use serde::{Deserialize, Serialize};

use crate::required;

/// Configuration for the intraday horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntradayConfig {
    /// RSI below this is oversold (bullish)
    pub rsi_oversold: f64,
    /// RSI above this is overbought (bearish)
    pub rsi_overbought: f64,
    pub stoch_oversold: f64,
    pub stoch_overbought: f64,
    /// ATR as percent of price above which volatility is flagged
    pub high_volatility_pct: f64,
}

impl Default for IntradayConfig {
    fn default() -> Self {
        Self {
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            stoch_oversold: 20.0,
            stoch_overbought: 80.0,
            high_volatility_pct: 3.0,
        }
    }
}

impl HorizonConfig for IntradayConfig {
    fn validate(&self) -> Result<(), ScoringError> {
        let bands = [
            ("RSI", self.rsi_oversold, self.rsi_overbought),
            ("Stochastic", self.stoch_oversold, self.stoch_overbought),
        ];
        for (name, oversold, overbought) in bands {
            if overbought <= oversold {
                return Err(ScoringError::Config(format!(
                    "intraday: {name} overbought must be greater than oversold"
                )));
            }
            if !(0.0..=100.0).contains(&oversold) || !(0.0..=100.0).contains(&overbought) {
                return Err(ScoringError::Config(format!(
                    "intraday: {name} thresholds must be between 0 and 100"
                )));
            }
        }
        if !(self.high_volatility_pct.is_finite() && self.high_volatility_pct > 0.0) {
            return Err(ScoringError::Config(
                "intraday: high_volatility_pct must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Oscillator extremes on the intraday horizon.
#[derive(Debug, Clone, Default)]
pub struct IntradayStrategy {
    config: IntradayConfig,
}

impl IntradayStrategy {
    pub fn new(config: IntradayConfig) -> Self {
        Self { config }
    }

    /// Signed component of a 0-100 oscillator: positive when oversold,
    /// negative when overbought, zero in between.
    fn oscillator_component(value: f64, oversold: f64, overbought: f64) -> f64 {
        if value < oversold {
            (50.0 - value) / 50.0
        } else if value > overbought {
            -(value - 50.0) / 50.0
        } else {
            0.0
        }
    }

    fn confidence(rsi_component: f64, stoch_component: f64) -> f64 {
        match (rsi_component != 0.0, stoch_component != 0.0) {
            (true, true) if rsi_component.signum() == stoch_component.signum() => 0.9,
            (true, true) => 0.3,
            (true, false) | (false, true) => 0.6,
            (false, false) => 0.5,
        }
    }

    fn describe(name: &str, value: f64, oversold: f64, overbought: f64) -> String {
        let zone = if value < oversold {
            "oversold"
        } else if value > overbought {
            "overbought"
        } else {
            "neutral"
        };
        format!("{name} {zone} ({value:.1})")
    }

    fn evaluate(&self, indicators: &IndicatorResult) -> Result<HorizonScore, String> {
        let cfg = &self.config;
        let rsi = required(&indicators.rsi)?;
        let stoch = required(&indicators.stochastic)?;

        let rsi_component = Self::oscillator_component(rsi, cfg.rsi_oversold, cfg.rsi_overbought);
        let stoch_component =
            Self::oscillator_component(stoch.k, cfg.stoch_oversold, cfg.stoch_overbought);

        let strength = (rsi_component + stoch_component) / 2.0;
        let confidence = Self::confidence(rsi_component, stoch_component);

        let mut reasons = vec![
            Self::describe("RSI", rsi, cfg.rsi_oversold, cfg.rsi_overbought),
            Self::describe("Stochastic %K", stoch.k, cfg.stoch_oversold, cfg.stoch_overbought),
        ];

        if let Some(bb) = indicators.bollinger.value() {
            if bb.percent_b < 0.1 {
                reasons.push("Price at lower Bollinger band".to_string());
            } else if bb.percent_b > 0.9 {
                reasons.push("Price at upper Bollinger band".to_string());
            }
        }
        if let Some(atr_pct) = indicators.atr_pct() {
            if atr_pct > cfg.high_volatility_pct {
                reasons.push(format!("High volatility (ATR {atr_pct:.2}% of price)"));
            }
        }

        Ok(HorizonScore::new(Horizon::Intraday, strength, confidence, reasons))
    }
}

impl HorizonStrategy for IntradayStrategy {
    fn horizon(&self) -> Horizon {
        Horizon::Intraday
    }

    fn name(&self) -> &str {
        "Intraday"
    }

    fn score(&self, indicators: &IndicatorResult) -> HorizonScore {
        self.evaluate(indicators)
            .unwrap_or_else(|reason| HorizonScore::unavailable(Horizon::Intraday, reason))
    }

    fn required_indicators(&self) -> &'static [&'static str] {
        &["rsi", "stochastic"]
    }

    fn description(&self) -> &str {
        "RSI and Stochastic oversold/overbought extremes over a few hours"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::empty;
    use scoring_core::{BollingerOutput, Direction, Reading, StochasticOutput};

    fn snapshot(rsi: f64, k: f64) -> IndicatorResult {
        let mut result = empty(100.0);
        result.rsi = Reading::Available(rsi);
        result.stochastic = Reading::Available(StochasticOutput { k, d: k });
        result
    }

    #[test]
    fn test_both_oversold() {
        let score = IntradayStrategy::default().score(&snapshot(20.0, 10.0));

        // (0.6 + 0.8) / 2
        assert!((score.strength - 0.7).abs() < 1e-10);
        assert_eq!(score.confidence, 0.9);
        assert_eq!(score.direction, Direction::Buy);
        assert_eq!(score.reasons[0], "RSI oversold (20.0)");
    }

    #[test]
    fn test_overbought_is_bearish() {
        let score = IntradayStrategy::default().score(&snapshot(80.0, 50.0));

        assert!((score.strength - (-0.3)).abs() < 1e-10);
        assert_eq!(score.confidence, 0.6);
        assert_eq!(score.direction, Direction::Sell);
    }

    #[test]
    fn test_conflicting_oscillators() {
        let score = IntradayStrategy::default().score(&snapshot(20.0, 90.0));

        assert!((score.strength - (0.6 - 0.8) / 2.0).abs() < 1e-10);
        assert_eq!(score.confidence, 0.3);
    }

    #[test]
    fn test_neutral_zone() {
        let score = IntradayStrategy::default().score(&snapshot(50.0, 50.0));

        assert_eq!(score.strength, 0.0);
        assert_eq!(score.confidence, 0.5);
        assert_eq!(score.direction, Direction::Neutral);
    }

    #[test]
    fn test_missing_stochastic() {
        let mut indicators = empty(100.0);
        indicators.rsi = Reading::Available(20.0);

        let score = IntradayStrategy::default().score(&indicators);
        assert_eq!(score.confidence, 0.0);
        assert_eq!(score.direction, Direction::Neutral);
        assert!(score.reasons[0].contains("insufficient data"));
    }

    #[test]
    fn test_informational_reasons_do_not_move_score() {
        let plain = IntradayStrategy::default().score(&snapshot(50.0, 50.0));

        let mut indicators = snapshot(50.0, 50.0);
        indicators.bollinger = Reading::Available(BollingerOutput {
            upper: 110.0,
            middle: 105.0,
            lower: 100.5,
            bandwidth: 0.09,
            percent_b: -0.05,
        });
        indicators.atr = Reading::Available(5.0);

        let score = IntradayStrategy::default().score(&indicators);
        assert_eq!(score.strength, plain.strength);
        assert_eq!(score.confidence, plain.confidence);
        assert!(score.reasons.contains(&"Price at lower Bollinger band".to_string()));
        assert!(score.reasons.iter().any(|r| r.starts_with("High volatility")));
    }

    #[test]
    fn test_declining_series_reads_oversold() {
        use scoring_core::PriceSeries;
        use scoring_indicators::{compute, IndicatorParams};

        let mut closes = vec![100.0; 20];
        closes.extend((1..=14).map(|i| 100.0 - i as f64));
        let series = PriceSeries::from_closes(0, 60_000, &closes).unwrap();
        let indicators = compute(&series, &series.volumes(), &IndicatorParams::default()).unwrap();

        let score = IntradayStrategy::default().score(&indicators);
        assert_eq!(score.direction, Direction::Buy);
        assert!(score.strength > 0.0);
        assert_eq!(score.confidence, 0.9);
    }

    #[test]
    fn test_config_validation() {
        assert!(IntradayConfig::default().validate().is_ok());

        let config = IntradayConfig {
            rsi_oversold: 80.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_thresholds_rejected() {
        let config = IntradayConfig {
            stoch_oversold: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = IntradayConfig {
            high_volatility_pct: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
