//! Indicator outputs and the per-evaluation indicator snapshot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Direction;
use crate::error::IndicatorError;

/// Outcome of one indicator calculation.
///
/// Horizons match on this instead of probing for missing values.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading<T> {
    Available(T),
    Unavailable(IndicatorError),
}

impl<T> Reading<T> {
    /// Get the value if available.
    pub fn value(&self) -> Option<&T> {
        match self {
            Reading::Available(value) => Some(value),
            Reading::Unavailable(_) => None,
        }
    }

    /// Borrow as a result, for use with `?` inside horizon code.
    pub fn as_result(&self) -> Result<&T, &IndicatorError> {
        match self {
            Reading::Available(value) => Ok(value),
            Reading::Unavailable(err) => Err(err),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Reading::Available(_))
    }

    /// Transform the value, keeping the failure as is.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reading<U> {
        match self {
            Reading::Available(value) => Reading::Available(f(value)),
            Reading::Unavailable(err) => Reading::Unavailable(err),
        }
    }
}

impl<T> From<Result<T, IndicatorError>> for Reading<T> {
    fn from(result: Result<T, IndicatorError>) -> Self {
        match result {
            Ok(value) => Reading::Available(value),
            Err(err) => Reading::Unavailable(err),
        }
    }
}

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: f64,
    /// Signal line (EMA of MACD)
    pub signal: f64,
    /// Histogram (MACD - Signal)
    pub histogram: f64,
}

/// Most recent sign change of the MACD histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crossover {
    /// MACD crossed above its signal line
    pub bullish: bool,
    /// Bars since the cross; 0 means the latest bar
    pub bars_ago: usize,
}

/// Latest MACD values with crossover context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdState {
    pub latest: MacdOutput,
    pub last_crossover: Option<Crossover>,
}

/// Stochastic oscillator output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StochasticOutput {
    /// %K (fast stochastic)
    pub k: f64,
    /// %D (slow stochastic / signal)
    pub d: f64,
}

/// Bollinger Bands output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerOutput {
    /// Upper band
    pub upper: f64,
    /// Middle band (SMA)
    pub middle: f64,
    /// Lower band
    pub lower: f64,
    /// Bandwidth ((upper - lower) / middle)
    pub bandwidth: f64,
    /// %B ((price - lower) / (upper - lower))
    pub percent_b: f64,
}

/// Rolling price extremes used as support and resistance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportResistance {
    /// Lowest low of the window
    pub support: f64,
    /// Highest high of the window
    pub resistance: f64,
}

/// On-balance volume with its recent change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObvState {
    pub value: f64,
    /// OBV now minus OBV a few bars back
    pub change: f64,
}

/// Latest indicator values for one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorResult {
    /// Last close of the series
    pub close: f64,
    pub rsi: Reading<f64>,
    pub stochastic: Reading<StochasticOutput>,
    pub macd: Reading<MacdState>,
    /// Rate of change of close, in percent
    pub momentum_pct: Reading<f64>,
    pub bollinger: Reading<BollingerOutput>,
    pub atr: Reading<f64>,
    /// Fast trend SMA (50 by default)
    pub sma_fast: Reading<f64>,
    /// Slow trend SMA (200 by default)
    pub sma_slow: Reading<f64>,
    /// Long trend EMA (200 by default)
    pub ema_trend: Reading<f64>,
    /// Slope of the long trend EMA, in percent over the lookback
    pub ema_slope_pct: Reading<f64>,
    pub levels: Reading<SupportResistance>,
    pub obv: Reading<ObvState>,
}

impl IndicatorResult {
    /// ATR as a percentage of the last close.
    pub fn atr_pct(&self) -> Option<f64> {
        match self.atr {
            Reading::Available(atr) if self.close != 0.0 => Some(atr / self.close * 100.0),
            _ => None,
        }
    }

    /// Available scalar values keyed by indicator name.
    pub fn values(&self) -> BTreeMap<&'static str, f64> {
        let mut values = BTreeMap::new();
        values.insert("close", self.close);

        let scalars = [
            ("rsi", &self.rsi),
            ("momentum_pct", &self.momentum_pct),
            ("atr", &self.atr),
            ("sma_fast", &self.sma_fast),
            ("sma_slow", &self.sma_slow),
            ("ema_trend", &self.ema_trend),
            ("ema_slope_pct", &self.ema_slope_pct),
        ];
        for (name, reading) in scalars {
            if let Some(&value) = reading.value() {
                values.insert(name, value);
            }
        }

        if let Some(stoch) = self.stochastic.value() {
            values.insert("stoch_k", stoch.k);
            values.insert("stoch_d", stoch.d);
        }
        if let Some(macd) = self.macd.value() {
            values.insert("macd", macd.latest.macd);
            values.insert("macd_signal", macd.latest.signal);
            values.insert("macd_histogram", macd.latest.histogram);
        }
        if let Some(bb) = self.bollinger.value() {
            values.insert("bb_upper", bb.upper);
            values.insert("bb_middle", bb.middle);
            values.insert("bb_lower", bb.lower);
            values.insert("bb_percent_b", bb.percent_b);
        }
        if let Some(levels) = self.levels.value() {
            values.insert("support", levels.support);
            values.insert("resistance", levels.resistance);
        }
        if let Some(obv) = self.obv.value() {
            values.insert("obv", obv.value);
        }
        if let Some(atr_pct) = self.atr_pct() {
            values.insert("atr_pct", atr_pct);
        }

        values
    }

    /// Simple per-indicator buy/sell votes.
    pub fn votes(&self) -> BTreeMap<&'static str, Direction> {
        let mut votes = BTreeMap::new();

        if let Some(&rsi) = self.rsi.value() {
            votes.insert("rsi", band_vote(rsi, 30.0, 70.0));
        }
        if let Some(macd) = self.macd.value() {
            let vote = if macd.latest.macd > macd.latest.signal {
                Direction::Buy
            } else {
                Direction::Sell
            };
            votes.insert("macd", vote);
        }
        if let Some(bb) = self.bollinger.value() {
            votes.insert("bollinger", band_vote(bb.percent_b, 0.2, 0.8));
        }
        if let Some(stoch) = self.stochastic.value() {
            votes.insert("stochastic", band_vote(stoch.k, 20.0, 80.0));
        }
        if let (Some(&fast), Some(&slow)) = (self.sma_fast.value(), self.sma_slow.value()) {
            let vote = if self.close > fast && fast > slow {
                Direction::Buy
            } else if self.close < fast && fast < slow {
                Direction::Sell
            } else {
                Direction::Neutral
            };
            votes.insert("trend", vote);
        }

        votes
    }

    /// Majority of the votes, requiring at least two on the winning side.
    pub fn consensus(&self) -> Direction {
        let votes = self.votes();
        let buys = votes.values().filter(|v| **v == Direction::Buy).count();
        let sells = votes.values().filter(|v| **v == Direction::Sell).count();

        if buys > sells && buys >= 2 {
            Direction::Buy
        } else if sells > buys && sells >= 2 {
            Direction::Sell
        } else {
            Direction::Neutral
        }
    }
}

fn band_vote(value: f64, low: f64, high: f64) -> Direction {
    if value < low {
        Direction::Buy
    } else if value > high {
        Direction::Sell
    } else {
        Direction::Neutral
    }
}
