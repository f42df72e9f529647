//! Final asset signal and its classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Direction, HorizonScore, OrderBookSignal};
use crate::error::ScoringError;

/// Five-level recommendation derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    StrongSell,
    Sell,
    Neutral,
    Buy,
    StrongBuy,
}

impl Classification {
    /// Number of levels away from neutral (0 to 2).
    pub fn intensity(&self) -> u8 {
        match self {
            Classification::Neutral => 0,
            Classification::Buy | Classification::Sell => 1,
            Classification::StrongBuy | Classification::StrongSell => 2,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Classification::StrongBuy => "strong_buy",
            Classification::Buy => "buy",
            Classification::Neutral => "neutral",
            Classification::Sell => "sell",
            Classification::StrongSell => "strong_sell",
        };
        write!(f, "{s}")
    }
}

/// Score boundaries between classification levels.
///
/// Bounds are inclusive toward the stronger level: a score equal to
/// `strong` is a strong buy, a score equal to `-weak` is a sell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassificationThresholds {
    pub strong: f64,
    pub weak: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            strong: 0.6,
            weak: 0.2,
        }
    }
}

impl ClassificationThresholds {
    pub fn validate(&self) -> Result<(), ScoringError> {
        if !(self.weak > 0.0 && self.weak < self.strong && self.strong <= 1.0) {
            return Err(ScoringError::Config(format!(
                "classification thresholds must satisfy 0 < weak < strong <= 1 (weak {}, strong {})",
                self.weak, self.strong
            )));
        }
        Ok(())
    }

    /// Map a final score onto a classification.
    pub fn classify(&self, score: f64) -> Classification {
        if score >= self.strong {
            Classification::StrongBuy
        } else if score >= self.weak {
            Classification::Buy
        } else if score > -self.weak {
            Classification::Neutral
        } else if score > -self.strong {
            Classification::Sell
        } else {
            Classification::StrongSell
        }
    }
}

/// How consistently the contributing horizons point the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Agreement {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Agreement {
    /// Agreement of the contributing horizon scores.
    pub fn from_scores(scores: &[HorizonScore]) -> Self {
        let directions: Vec<Direction> = scores
            .iter()
            .filter(|s| s.is_contributing())
            .map(|s| s.direction)
            .collect();
        if directions.is_empty() {
            return Agreement::Low;
        }

        let total = directions.len() as f64;
        let buys = directions.iter().filter(|d| **d == Direction::Buy).count() as f64;
        let sells = directions.iter().filter(|d| **d == Direction::Sell).count() as f64;
        let dominant = buys.max(sells);

        if dominant == total {
            Agreement::VeryHigh
        } else if dominant >= total * 0.75 {
            Agreement::High
        } else if dominant >= total * 0.5 {
            Agreement::Medium
        } else {
            Agreement::Low
        }
    }
}

impl fmt::Display for Agreement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Agreement::Low => "low",
            Agreement::Medium => "medium",
            Agreement::High => "high",
            Agreement::VeryHigh => "very high",
        };
        write!(f, "{s}")
    }
}

/// Final scored output for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSignal {
    pub asset_id: String,
    /// Time of the last bar the signal was computed from
    pub timestamp: DateTime<Utc>,
    /// Weighted score in [-1, 1]
    pub final_score: f64,
    pub classification: Classification,
    pub horizon_scores: Vec<HorizonScore>,
    /// Capped order book share of the final score
    pub order_book_contribution: f64,
    pub rationale: Vec<String>,
    pub agreement: Agreement,
    /// Order book analysis when a snapshot was supplied
    pub order_book: Option<OrderBookSignal>,
}

impl AssetSignal {
    /// Score for one horizon.
    pub fn horizon(&self, horizon: super::Horizon) -> Option<&HorizonScore> {
        self.horizon_scores.iter().find(|s| s.horizon == horizon)
    }
}
