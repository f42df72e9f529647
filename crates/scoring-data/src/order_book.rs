//! Order book snapshots stored as JSON.
//!
//! The layout is the usual exchange depth format:
//! `{"bids": [[price, size], ...], "asks": [[price, size], ...]}` with an
//! optional `"mid_price"`.

use scoring_core::{DataError, OrderBookSnapshot};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse a snapshot from JSON text.
pub fn parse_order_book(json: &str) -> Result<OrderBookSnapshot, DataError> {
    serde_json::from_str(json).map_err(|e| DataError::ParseError(format!("order book: {e}")))
}

/// Load a snapshot from a JSON file.
pub fn load_order_book(path: impl AsRef<Path>) -> Result<OrderBookSnapshot, DataError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(DataError::NoDataAvailable(path.display().to_string()));
    }
    let text = fs::read_to_string(path)?;
    let book = parse_order_book(&text)?;
    debug!(
        path = %path.display(),
        bids = book.bids().len(),
        asks = book.asks().len(),
        "Loaded order book"
    );
    Ok(book)
}
