//! Horizon weights and their redistribution.

use scoring_core::{Horizon, HorizonScore, ScoringError};
use serde::{Deserialize, Serialize};

/// Base weight of each horizon in the final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HorizonWeights {
    pub intraday: f64,
    pub short: f64,
    pub medium: f64,
    pub long: f64,
}

impl Default for HorizonWeights {
    fn default() -> Self {
        Self {
            intraday: 0.15,
            short: 0.30,
            medium: 0.35,
            long: 0.20,
        }
    }
}

/// Per-asset or per-call replacement of individual horizon weights.
///
/// Unset horizons keep their base weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeightOverrides {
    pub intraday: Option<f64>,
    pub short: Option<f64>,
    pub medium: Option<f64>,
    pub long: Option<f64>,
}

impl WeightOverrides {
    pub fn is_empty(&self) -> bool {
        self.intraday.is_none() && self.short.is_none() && self.medium.is_none() && self.long.is_none()
    }
}

impl HorizonWeights {
    pub fn get(&self, horizon: Horizon) -> f64 {
        match horizon {
            Horizon::Intraday => self.intraday,
            Horizon::Short => self.short,
            Horizon::Medium => self.medium,
            Horizon::Long => self.long,
        }
    }

    /// Weights must be finite, non-negative and not all zero.
    pub fn validate(&self) -> Result<(), ScoringError> {
        for horizon in Horizon::ALL {
            let weight = self.get(horizon);
            if !weight.is_finite() || weight < 0.0 {
                return Err(ScoringError::Config(format!(
                    "weight for {horizon} horizon must be a non-negative number, got {weight}"
                )));
            }
        }
        if self.total() <= 0.0 {
            return Err(ScoringError::Config(
                "horizon weights must not all be zero".into(),
            ));
        }
        Ok(())
    }

    pub fn total(&self) -> f64 {
        Horizon::ALL.iter().map(|h| self.get(*h)).sum()
    }

    /// Copy with the overrides applied. The result is validated.
    pub fn merge(&self, overrides: &WeightOverrides) -> Result<Self, ScoringError> {
        let merged = Self {
            intraday: overrides.intraday.unwrap_or(self.intraday),
            short: overrides.short.unwrap_or(self.short),
            medium: overrides.medium.unwrap_or(self.medium),
            long: overrides.long.unwrap_or(self.long),
        };
        merged.validate()?;
        Ok(merged)
    }

    /// Effective weight per score, in the order given.
    ///
    /// Horizons that could not be scored get 0 and the remaining weights
    /// are rescaled to sum to 1. When nothing is left every weight is 0.
    pub fn normalize(&self, scores: &[HorizonScore]) -> Vec<f64> {
        let raw: Vec<f64> = scores
            .iter()
            .map(|s| {
                if s.is_contributing() {
                    self.get(s.horizon)
                } else {
                    0.0
                }
            })
            .collect();

        let total: f64 = raw.iter().sum();
        if total <= 0.0 {
            return vec![0.0; scores.len()];
        }
        raw.into_iter().map(|w| w / total).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(confidences: [f64; 4]) -> Vec<HorizonScore> {
        Horizon::ALL
            .iter()
            .zip(confidences)
            .map(|(h, c)| HorizonScore::new(*h, 0.5, c, vec![]))
            .collect()
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = HorizonWeights::default();
        assert!((weights.total() - 1.0).abs() < 1e-12);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_redistribution_sums_to_one() {
        let weights = HorizonWeights::default();

        for mask in 1..16u8 {
            let confidences = [0, 1, 2, 3].map(|i| if mask & (1 << i) != 0 { 0.5 } else { 0.0 });
            let normalized = weights.normalize(&scores(confidences));
            let total: f64 = normalized.iter().sum();
            assert!((total - 1.0).abs() < 1e-12, "mask {mask}: {total}");

            for (i, w) in normalized.iter().enumerate() {
                if confidences[i] == 0.0 {
                    assert_eq!(*w, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_redistribution_is_proportional() {
        let normalized = HorizonWeights::default().normalize(&scores([0.0, 0.5, 0.5, 0.0]));

        // 0.30 and 0.35 rescaled over 0.65
        assert!((normalized[1] - 0.30 / 0.65).abs() < 1e-12);
        assert!((normalized[2] - 0.35 / 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_nothing_contributing() {
        let normalized = HorizonWeights::default().normalize(&scores([0.0; 4]));
        assert_eq!(normalized, vec![0.0; 4]);
    }

    #[test]
    fn test_merge_overrides() {
        let overrides = WeightOverrides {
            long: Some(0.5),
            ..Default::default()
        };
        let merged = HorizonWeights::default().merge(&overrides).unwrap();
        assert_eq!(merged.long, 0.5);
        assert_eq!(merged.short, 0.30);
        assert!(!overrides.is_empty());
    }

    #[test]
    fn test_invalid_weights() {
        let overrides = WeightOverrides {
            short: Some(-0.1),
            ..Default::default()
        };
        assert!(HorizonWeights::default().merge(&overrides).is_err());

        let zero = HorizonWeights {
            intraday: 0.0,
            short: 0.0,
            medium: 0.0,
            long: 0.0,
        };
        assert!(zero.validate().is_err());
    }
}
