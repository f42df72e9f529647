//! Indicator trait definitions.

use crate::error::IndicatorError;

/// Trait for technical indicators computed from a single input series.
///
/// Indicators process price data and produce derived values
/// useful for scoring decisions.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically closes)
    ///
    /// # Returns
    /// One value per position where the window is complete; empty when
    /// the data is too short.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &'static str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                indicator: self.name(),
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }

    /// Latest value, or `InsufficientData` when the window is not filled.
    fn latest(&self, data: &[f64]) -> Result<Self::Output, IndicatorError> {
        self.validate_data(data)?;
        self.calculate(data)
            .pop()
            .ok_or_else(|| IndicatorError::CalculationError(format!("{} produced no output", self.name())))
    }
}

/// Indicator that needs high, low and close series.
pub trait OhlcIndicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values from OHLC data.
    ///
    /// # Arguments
    /// * `high` - High prices
    /// * `low` - Low prices
    /// * `close` - Close prices
    fn calculate_ohlc(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &'static str;

    /// Latest value, or `InsufficientData` when the window is not filled.
    fn latest_ohlc(
        &self,
        high: &[f64],
        low: &[f64],
        close: &[f64],
    ) -> Result<Self::Output, IndicatorError> {
        let available = high.len().min(low.len()).min(close.len());
        if available < self.period() {
            return Err(IndicatorError::InsufficientData {
                indicator: self.name(),
                required: self.period(),
                available,
            });
        }
        self.calculate_ohlc(high, low, close)
            .pop()
            .ok_or_else(|| IndicatorError::CalculationError(format!("{} produced no output", self.name())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestIndicator {
        period: usize,
    }

    impl Indicator for TestIndicator {
        type Output = f64;

        fn calculate(&self, data: &[f64]) -> Vec<f64> {
            if data.len() < self.period {
                return vec![];
            }
            // Simple sum indicator for testing
            data.windows(self.period).map(|w| w.iter().sum()).collect()
        }

        fn period(&self) -> usize {
            self.period
        }

        fn name(&self) -> &'static str {
            "test"
        }
    }

    #[test]
    fn test_indicator_validation() {
        let indicator = TestIndicator { period: 5 };

        assert!(indicator.validate_data(&[1.0, 2.0, 3.0]).is_err());
        assert!(indicator.validate_data(&[1.0, 2.0, 3.0, 4.0, 5.0]).is_ok());
    }

    #[test]
    fn test_latest_value() {
        let indicator = TestIndicator { period: 3 };
        let latest = indicator.latest(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((latest - 12.0).abs() < 0.001); // 3+4+5
    }

    #[test]
    fn test_latest_reports_shortfall() {
        let indicator = TestIndicator { period: 4 };
        let err = indicator.latest(&[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::InsufficientData {
                indicator: "test",
                required: 4,
                available: 3,
            }
        );
    }
}
