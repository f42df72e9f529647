//! OHLCV bars and the validated price series.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Compact OHLCV bar.
/// Uses f64 for fast indicator calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp).unwrap_or_default()
    }

    /// Calculate the true range (used for ATR).
    pub fn true_range(&self, prev_close: Option<f64>) -> f64 {
        match prev_close {
            Some(pc) => {
                let hl = self.high - self.low;
                let hc = (self.high - pc).abs();
                let lc = (self.low - pc).abs();
                hl.max(hc).max(lc)
            }
            None => self.high - self.low,
        }
    }

    fn check(&self, index: usize) -> Result<(), InputError> {
        if DateTime::from_timestamp_millis(self.timestamp).is_none() {
            return Err(InputError::InvalidValue {
                index,
                field: "timestamp",
                value: self.timestamp as f64,
            });
        }
        let fields = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ];
        for (field, value) in fields {
            if !value.is_finite() || (field == "volume" && value < 0.0) {
                return Err(InputError::InvalidValue {
                    index,
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Non-empty bar series, strictly ascending by timestamp.
///
/// The series is immutable once built; every evaluation reads it through
/// shared references only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bar>", into = "Vec<Bar>")]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Validate and wrap a list of bars.
    pub fn new(bars: Vec<Bar>) -> Result<Self, InputError> {
        if bars.is_empty() {
            return Err(InputError::EmptySeries);
        }

        for (index, bar) in bars.iter().enumerate() {
            bar.check(index)?;
            if index > 0 {
                let previous = bars[index - 1].timestamp;
                if bar.timestamp <= previous {
                    return Err(InputError::Unordered {
                        index,
                        previous,
                        timestamp: bar.timestamp,
                    });
                }
            }
        }

        Ok(Self { bars })
    }

    /// Build a series from close prices only, one bar per `step_ms`.
    ///
    /// High and low equal the close; volume is zero.
    pub fn from_closes(start_ms: i64, step_ms: i64, closes: &[f64]) -> Result<Self, InputError> {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar::new(start_ms + i as i64 * step_ms, close, close, close, close, 0.0))
            .collect();
        Self::new(bars)
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get all bars as a slice.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Get the most recent bar.
    pub fn last(&self) -> &Bar {
        // Non-empty by construction.
        &self.bars[self.bars.len() - 1]
    }

    /// Timestamp of the most recent bar.
    pub fn latest_time(&self) -> DateTime<Utc> {
        self.last().datetime()
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Extract high prices as a vector.
    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    /// Extract low prices as a vector.
    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// Extract volumes as a vector.
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }
}

impl TryFrom<Vec<Bar>> for PriceSeries {
    type Error = InputError;

    fn try_from(bars: Vec<Bar>) -> Result<Self, Self::Error> {
        Self::new(bars)
    }
}

impl From<PriceSeries> for Vec<Bar> {
    fn from(series: PriceSeries) -> Self {
        series.bars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_true_range() {
        let bar = Bar::new(1000, 100.0, 110.0, 95.0, 105.0, 1000000.0);

        assert!((bar.true_range(None) - 15.0).abs() < 0.001);
        // Gap down from previous close widens the range
        assert!((bar.true_range(Some(90.0)) - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_empty_series_rejected() {
        assert_eq!(PriceSeries::new(vec![]), Err(InputError::EmptySeries));
    }

    #[test]
    fn test_unordered_series_rejected() {
        let bars = vec![
            Bar::new(2, 1.0, 1.0, 1.0, 1.0, 10.0),
            Bar::new(1, 1.0, 1.0, 1.0, 1.0, 10.0),
        ];
        assert!(matches!(
            PriceSeries::new(bars),
            Err(InputError::Unordered { index: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_timestamp_rejected() {
        let bars = vec![
            Bar::new(5, 1.0, 1.0, 1.0, 1.0, 10.0),
            Bar::new(5, 1.0, 1.0, 1.0, 1.0, 10.0),
        ];
        assert!(PriceSeries::new(bars).is_err());
    }

    #[test]
    fn test_non_finite_value_rejected() {
        let bars = vec![Bar::new(1, 1.0, 1.0, 1.0, f64::NAN, 10.0)];
        assert!(matches!(
            PriceSeries::new(bars),
            Err(InputError::InvalidValue { field: "close", .. })
        ));
    }

    #[test]
    fn test_out_of_range_timestamp_rejected() {
        let bars = vec![
            Bar::new(1, 1.0, 1.0, 1.0, 1.0, 10.0),
            Bar::new(i64::MAX, 1.0, 1.0, 1.0, 1.0, 10.0),
        ];
        assert!(matches!(
            PriceSeries::new(bars),
            Err(InputError::InvalidValue { index: 1, field: "timestamp", .. })
        ));
    }

    #[test]
    fn test_series_extractions() {
        let series = PriceSeries::new(vec![
            Bar::new(1, 100.0, 101.0, 99.0, 100.5, 1000.0),
            Bar::new(2, 100.5, 102.0, 100.0, 101.5, 2000.0),
        ])
        .unwrap();

        assert_eq!(series.closes(), vec![100.5, 101.5]);
        assert_eq!(series.volumes(), vec![1000.0, 2000.0]);
        assert_eq!(series.last().timestamp, 2);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok = r#"[{"timestamp":1,"open":1,"high":1,"low":1,"close":1,"volume":0}]"#;
        assert!(serde_json::from_str::<PriceSeries>(ok).is_ok());
        assert!(serde_json::from_str::<PriceSeries>("[]").is_err());
    }
}
