//! Technical indicators for signal scoring.
//!
//! This crate provides the indicator math the horizon evaluators read:
//! - Moving averages (SMA, EMA and EMA slope)
//! - Momentum indicators (RSI, MACD, Stochastic, rate of change)
//! - Volatility indicators (ATR, Bollinger Bands, Standard Deviation)
//! - Volume and level indicators (OBV, rolling support/resistance)
//!
//! [`compute`] runs all of them over one price series and collects the
//! latest values into an [`IndicatorResult`](scoring_core::IndicatorResult).

pub mod levels;
pub mod momentum;
pub mod moving_average;
pub mod snapshot;
pub mod volatility;
pub mod volume;

pub use levels::RollingExtremes;
pub use momentum::{Macd, RateOfChange, Rsi, Stochastic};
pub use moving_average::{Ema, Sma};
pub use snapshot::{compute, IndicatorParams};
pub use volatility::{Atr, BollingerBands, StdDev};
pub use volume::Obv;
