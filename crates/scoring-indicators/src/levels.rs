//! Support and resistance levels.

use scoring_core::{OhlcIndicator, SupportResistance};

/// Lowest low and highest high over the last N bars.
#[derive(Debug, Clone)]
pub struct RollingExtremes {
    period: usize,
}

impl RollingExtremes {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Default for RollingExtremes {
    fn default() -> Self {
        Self::new(20)
    }
}

impl OhlcIndicator for RollingExtremes {
    type Output = SupportResistance;

    fn calculate_ohlc(&self, high: &[f64], low: &[f64], _close: &[f64]) -> Vec<SupportResistance> {
        let len = high.len().min(low.len());
        if len < self.period {
            return vec![];
        }

        high[..len]
            .windows(self.period)
            .zip(low[..len].windows(self.period))
            .map(|(highs, lows)| SupportResistance {
                support: lows.iter().cloned().fold(f64::INFINITY, f64::min),
                resistance: highs.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &'static str {
        "Support/Resistance"
    }
}
