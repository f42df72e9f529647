//! Volume indicators.

use scoring_core::{IndicatorError, ObvState};

/// On-Balance Volume (OBV).
///
/// Running total of volume, added on up closes and subtracted on down
/// closes. The first bar contributes nothing.
#[derive(Debug, Clone)]
pub struct Obv {
    lookback: usize,
}

impl Obv {
    /// Create an OBV whose `change` compares against `lookback` bars back.
    pub fn new(lookback: usize) -> Self {
        assert!(lookback > 0, "Lookback must be greater than 0");
        Self { lookback }
    }

    /// Full OBV series, one value per bar.
    pub fn calculate(&self, closes: &[f64], volumes: &[f64]) -> Vec<f64> {
        let len = closes.len().min(volumes.len());
        if len == 0 {
            return vec![];
        }

        let mut result = Vec::with_capacity(len);
        let mut obv = 0.0;
        result.push(obv);

        for i in 1..len {
            if closes[i] > closes[i - 1] {
                obv += volumes[i];
            } else if closes[i] < closes[i - 1] {
                obv -= volumes[i];
            }
            result.push(obv);
        }

        result
    }

    /// Minimum number of bars for [`Obv::state`].
    pub fn period(&self) -> usize {
        2
    }

    /// Latest OBV and its change over the lookback.
    ///
    /// With fewer than `lookback + 1` bars the change is taken from the
    /// first bar.
    pub fn state(&self, closes: &[f64], volumes: &[f64]) -> Result<ObvState, IndicatorError> {
        if closes.len() != volumes.len() {
            return Err(IndicatorError::InvalidParameter(format!(
                "OBV needs one volume per close ({} closes, {} volumes)",
                closes.len(),
                volumes.len()
            )));
        }
        if closes.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                indicator: "OBV",
                required: self.period(),
                available: closes.len(),
            });
        }

        let series = self.calculate(closes, volumes);
        let value = series[series.len() - 1];
        let back = self.lookback.min(series.len() - 1);
        let then = series[series.len() - 1 - back];
        Ok(ObvState {
            value,
            change: value - then,
        })
    }
}

impl Default for Obv {
    fn default() -> Self {
        Self::new(4)
    }
}
