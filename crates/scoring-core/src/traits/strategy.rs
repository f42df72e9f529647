//! Horizon strategy trait definitions.

use crate::error::ScoringError;
use crate::types::{Horizon, HorizonScore, IndicatorResult};

/// Configuration trait for horizon strategies.
pub trait HorizonConfig: Send + Sync + Clone + 'static {
    /// Validate the configuration.
    fn validate(&self) -> Result<(), ScoringError>;
}

/// Evaluator for one trading horizon.
///
/// Implementations are pure: the same indicator snapshot always yields the
/// same score, and a missing required indicator yields a neutral,
/// zero-confidence score instead of an error.
pub trait HorizonStrategy: Send + Sync {
    /// The horizon this strategy scores.
    fn horizon(&self) -> Horizon;

    /// Get the display name of this strategy.
    fn name(&self) -> &str;

    /// Score the horizon from the latest indicator values.
    fn score(&self, indicators: &IndicatorResult) -> HorizonScore;

    /// Names of the indicators the horizon cannot do without.
    fn required_indicators(&self) -> &'static [&'static str];

    /// Get a description of the strategy.
    fn description(&self) -> &str {
        ""
    }
}
