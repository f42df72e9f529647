//! Trading horizons and per-horizon scores.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strengths closer to zero than this read as neutral.
pub const DIRECTION_DEADBAND: f64 = 0.05;

/// Trading timeframe with its own signal logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Horizon {
    /// A few hours
    Intraday,
    /// 1-5 days
    Short,
    /// 1-4 weeks
    Medium,
    /// 1+ months
    Long,
}

impl Horizon {
    /// All horizons in aggregation order.
    pub const ALL: [Horizon; 4] = [
        Horizon::Intraday,
        Horizon::Short,
        Horizon::Medium,
        Horizon::Long,
    ];

    /// Holding period the horizon targets.
    pub fn holding_period(&self) -> &'static str {
        match self {
            Horizon::Intraday => "a few hours",
            Horizon::Short => "1-5 days",
            Horizon::Medium => "1-4 weeks",
            Horizon::Long => "1+ months",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Horizon::Intraday => "intraday",
            Horizon::Short => "short",
            Horizon::Medium => "medium",
            Horizon::Long => "long",
        };
        write!(f, "{s}")
    }
}

/// Directional call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Buy,
    Sell,
    Neutral,
}

impl Direction {
    /// Direction implied by a signed strength.
    pub fn from_strength(strength: f64) -> Self {
        if strength >= DIRECTION_DEADBAND {
            Direction::Buy
        } else if strength <= -DIRECTION_DEADBAND {
            Direction::Sell
        } else {
            Direction::Neutral
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Buy => "buy",
            Direction::Sell => "sell",
            Direction::Neutral => "neutral",
        };
        write!(f, "{s}")
    }
}

/// Directional sub-score produced by one horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonScore {
    pub horizon: Horizon,
    pub direction: Direction,
    /// Signed strength in [-1, 1]
    pub strength: f64,
    /// Confidence in [0, 1]; zero means the horizon could not be scored
    pub confidence: f64,
    pub reasons: Vec<String>,
}

impl HorizonScore {
    /// Build a score, clamping strength and confidence into range.
    /// The direction follows the clamped strength.
    pub fn new(horizon: Horizon, strength: f64, confidence: f64, reasons: Vec<String>) -> Self {
        let strength = clamp_unit(strength, -1.0);
        let confidence = clamp_unit(confidence, 0.0);
        Self {
            horizon,
            direction: Direction::from_strength(strength),
            strength,
            confidence,
            reasons,
        }
    }

    /// Neutral, zero-confidence score for a horizon whose inputs are missing.
    pub fn unavailable(horizon: Horizon, reason: impl Into<String>) -> Self {
        Self {
            horizon,
            direction: Direction::Neutral,
            strength: 0.0,
            confidence: 0.0,
            reasons: vec![reason.into()],
        }
    }

    /// Whether this score takes part in aggregation.
    pub fn is_contributing(&self) -> bool {
        self.confidence > 0.0
    }
}

fn clamp_unit(value: f64, lower: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(lower, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_deadband() {
        assert_eq!(Direction::from_strength(0.0), Direction::Neutral);
        assert_eq!(Direction::from_strength(0.04), Direction::Neutral);
        assert_eq!(Direction::from_strength(0.05), Direction::Buy);
        assert_eq!(Direction::from_strength(-0.3), Direction::Sell);
    }

    #[test]
    fn test_score_is_clamped() {
        let score = HorizonScore::new(Horizon::Short, 1.7, -0.2, vec![]);
        assert_eq!(score.strength, 1.0);
        assert_eq!(score.confidence, 0.0);
        assert_eq!(score.direction, Direction::Buy);

        let score = HorizonScore::new(Horizon::Short, f64::NAN, 0.5, vec![]);
        assert_eq!(score.strength, 0.0);
        assert_eq!(score.direction, Direction::Neutral);
    }

    #[test]
    fn test_unavailable_score() {
        let score = HorizonScore::unavailable(Horizon::Long, "EMA unavailable");
        assert_eq!(score.direction, Direction::Neutral);
        assert!(!score.is_contributing());
        assert_eq!(score.reasons, vec!["EMA unavailable".to_string()]);
    }

    #[test]
    fn test_horizon_serde_names() {
        assert_eq!(serde_json::to_string(&Horizon::Intraday).unwrap(), "\"intraday\"");
        assert_eq!(Horizon::Medium.to_string(), "medium");
    }
}
