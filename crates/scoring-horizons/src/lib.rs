//! Horizon evaluators.
//!
//! Each trading horizon reads a different slice of the indicator snapshot:
//! - Intraday: RSI and Stochastic extremes
//! - Short term: MACD and rate of change
//! - Medium term: SMA trend and support/resistance proximity
//! - Long term: slope of the long EMA

mod intraday;
mod long_term;
mod medium_term;
mod registry;
mod short_term;

pub use intraday::{IntradayConfig, IntradayStrategy};
pub use long_term::{LongTermConfig, LongTermStrategy};
pub use medium_term::{MediumTermConfig, MediumTermStrategy};
pub use registry::{HorizonInfo, HorizonRegistry, HorizonSettings};
pub use short_term::{ShortTermConfig, ShortTermStrategy};

use scoring_core::Reading;

/// Value of a reading the horizon cannot do without.
///
/// The error text becomes the reason of the unavailable score.
pub(crate) fn required<T: Copy>(reading: &Reading<T>) -> Result<T, String> {
    reading.as_result().copied().map_err(|e| e.to_string())
}

/// Scale a percentage into [-1, 1], saturating at `scale`.
pub(crate) fn scaled(value_pct: f64, scale_pct: f64) -> f64 {
    (value_pct / scale_pct).clamp(-1.0, 1.0)
}

#[cfg(test)]
pub(crate) mod testing {
    use scoring_core::{IndicatorError, IndicatorResult, Reading};

    pub fn missing<T>() -> Reading<T> {
        Reading::Unavailable(IndicatorError::InsufficientData {
            indicator: "test",
            required: 2,
            available: 1,
        })
    }

    /// Snapshot with nothing available.
    pub fn empty(close: f64) -> IndicatorResult {
        IndicatorResult {
            close,
            rsi: missing(),
            stochastic: missing(),
            macd: missing(),
            momentum_pct: missing(),
            bollinger: missing(),
            atr: missing(),
            sma_fast: missing(),
            sma_slow: missing(),
            ema_trend: missing(),
            ema_slope_pct: missing(),
            levels: missing(),
            obv: missing(),
        }
    }
}
