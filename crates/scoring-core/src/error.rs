//! Error types for the scoring engine.

use thiserror::Error;

/// Top-level scoring error.
#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("Order book required for {asset_id} but none was supplied")]
    MissingOrderBook { asset_id: String },

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

/// Malformed evaluation input. Fatal to a single evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("price series is empty")]
    EmptySeries,

    #[error("price series is not strictly ascending at index {index} ({timestamp} after {previous})")]
    Unordered {
        index: usize,
        previous: i64,
        timestamp: i64,
    },

    #[error("invalid {field} at index {index}: {value}")]
    InvalidValue {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("volume series has {volumes} points but price series has {prices}")]
    VolumeLengthMismatch { prices: usize, volumes: usize },

    #[error("invalid order book: {0}")]
    InvalidOrderBook(String),
}

/// Indicator calculation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("{indicator}: insufficient data, need {required} points, have {available}")]
    InsufficientData {
        indicator: &'static str,
        required: usize,
        available: usize,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Data loading errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("No data available at {0}")]
    NoDataAvailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid input: {0}")]
    Input(#[from] InputError),
}
