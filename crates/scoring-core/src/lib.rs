//! Core types and traits for the signal scoring engine.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, PriceSeries, OrderBookSnapshot)
//! - Tagged indicator readings and the per-evaluation IndicatorResult
//! - Horizon scores and the final AssetSignal
//! - Core traits for indicators and horizon strategies

pub mod error;
pub mod traits;
pub mod types;

pub use error::{DataError, IndicatorError, InputError, ScoringError};
pub use traits::*;
pub use types::*;
