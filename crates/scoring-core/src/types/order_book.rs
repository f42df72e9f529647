//! Order book snapshot and the signal derived from it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::InputError;

/// A single price level. Serialized as `[price, size]`, the layout
/// exchanges use for depth snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct BookLevel {
    pub price: f64,
    pub size: f64,
}

impl BookLevel {
    pub fn new(price: f64, size: f64) -> Self {
        Self { price, size }
    }
}

impl From<(f64, f64)> for BookLevel {
    fn from((price, size): (f64, f64)) -> Self {
        Self { price, size }
    }
}

impl From<BookLevel> for (f64, f64) {
    fn from(level: BookLevel) -> Self {
        (level.price, level.size)
    }
}

#[derive(Serialize, Deserialize)]
struct RawOrderBook {
    #[serde(default)]
    bids: Vec<BookLevel>,
    #[serde(default)]
    asks: Vec<BookLevel>,
    #[serde(default)]
    mid_price: Option<f64>,
}

/// Bid/ask depth snapshot.
///
/// Bids are sorted by descending price, asks by ascending price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOrderBook", into = "RawOrderBook")]
pub struct OrderBookSnapshot {
    bids: Vec<BookLevel>,
    asks: Vec<BookLevel>,
    mid_price: f64,
}

impl OrderBookSnapshot {
    /// Build a snapshot, deriving the mid price from the best levels.
    pub fn new(bids: Vec<BookLevel>, asks: Vec<BookLevel>) -> Result<Self, InputError> {
        let mid = match (bids.first(), asks.first()) {
            (Some(bid), Some(ask)) => (bid.price + ask.price) / 2.0,
            (Some(bid), None) => bid.price,
            (None, Some(ask)) => ask.price,
            (None, None) => {
                return Err(InputError::InvalidOrderBook(
                    "cannot derive mid price from an empty book".into(),
                ))
            }
        };
        Self::with_mid_price(bids, asks, mid)
    }

    /// Build a snapshot with an explicit mid price.
    pub fn with_mid_price(
        bids: Vec<BookLevel>,
        asks: Vec<BookLevel>,
        mid_price: f64,
    ) -> Result<Self, InputError> {
        if !mid_price.is_finite() || mid_price <= 0.0 {
            return Err(InputError::InvalidOrderBook(format!(
                "mid price must be positive, got {mid_price}"
            )));
        }
        check_side("bid", &bids, |prev, next| next < prev)?;
        check_side("ask", &asks, |prev, next| next > prev)?;

        if let (Some(bid), Some(ask)) = (bids.first(), asks.first()) {
            if bid.price > ask.price {
                return Err(InputError::InvalidOrderBook(format!(
                    "crossed book: best bid {} above best ask {}",
                    bid.price, ask.price
                )));
            }
        }

        Ok(Self {
            bids,
            asks,
            mid_price,
        })
    }

    pub fn bids(&self) -> &[BookLevel] {
        &self.bids
    }

    pub fn asks(&self) -> &[BookLevel] {
        &self.asks
    }

    pub fn mid_price(&self) -> f64 {
        self.mid_price
    }
}

fn check_side(
    side: &str,
    levels: &[BookLevel],
    ordered: impl Fn(f64, f64) -> bool,
) -> Result<(), InputError> {
    for (i, level) in levels.iter().enumerate() {
        if !level.price.is_finite() || level.price <= 0.0 {
            return Err(InputError::InvalidOrderBook(format!(
                "{side} level {i} has invalid price {}",
                level.price
            )));
        }
        if !level.size.is_finite() || level.size < 0.0 {
            return Err(InputError::InvalidOrderBook(format!(
                "{side} level {i} has invalid size {}",
                level.size
            )));
        }
        if i > 0 && !ordered(levels[i - 1].price, level.price) {
            return Err(InputError::InvalidOrderBook(format!(
                "{side} levels out of order at level {i}"
            )));
        }
    }
    Ok(())
}

impl TryFrom<RawOrderBook> for OrderBookSnapshot {
    type Error = InputError;

    fn try_from(raw: RawOrderBook) -> Result<Self, Self::Error> {
        match raw.mid_price {
            Some(mid) => Self::with_mid_price(raw.bids, raw.asks, mid),
            None => Self::new(raw.bids, raw.asks),
        }
    }
}

impl From<OrderBookSnapshot> for RawOrderBook {
    fn from(book: OrderBookSnapshot) -> Self {
        Self {
            bids: book.bids,
            asks: book.asks,
            mid_price: Some(book.mid_price),
        }
    }
}

/// Side of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookSide {
    Bid,
    Ask,
}

impl fmt::Display for BookSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookSide::Bid => write!(f, "bid"),
            BookSide::Ask => write!(f, "ask"),
        }
    }
}

/// A level far larger than the surrounding depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub side: BookSide,
    pub price: f64,
    pub size: f64,
    /// Distance from mid as a percentage of mid
    pub distance_pct: f64,
}

/// Signal derived from one order book snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSignal {
    /// Depth imbalance in [-1, 1], positive when bids dominate
    pub imbalance: f64,
    /// Detected walls, bids first
    pub walls: Vec<Wall>,
    /// Share of depth close to mid, in [0, 1]
    pub liquidity: f64,
    /// Directional signal in [-1, 1] before the contribution cap
    pub signal: f64,
    pub reasons: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(raw: &[(f64, f64)]) -> Vec<BookLevel> {
        raw.iter().copied().map(BookLevel::from).collect()
    }

    #[test]
    fn test_mid_price_from_best_levels() {
        let book = OrderBookSnapshot::new(
            levels(&[(100.0, 2.0), (99.5, 1.5)]),
            levels(&[(100.5, 2.5), (101.0, 1.0)]),
        )
        .unwrap();
        assert!((book.mid_price() - 100.25).abs() < 1e-12);
    }

    #[test]
    fn test_one_sided_book_uses_available_side() {
        let book = OrderBookSnapshot::new(levels(&[(50.0, 1.0)]), vec![]).unwrap();
        assert!((book.mid_price() - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_unordered_bids_rejected() {
        let result = OrderBookSnapshot::new(
            levels(&[(99.0, 1.0), (100.0, 1.0)]),
            levels(&[(101.0, 1.0)]),
        );
        assert!(matches!(result, Err(InputError::InvalidOrderBook(_))));
    }

    #[test]
    fn test_crossed_book_rejected() {
        let result = OrderBookSnapshot::new(levels(&[(101.0, 1.0)]), levels(&[(100.0, 1.0)]));
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_size_rejected() {
        let result = OrderBookSnapshot::new(levels(&[(100.0, -1.0)]), levels(&[(101.0, 1.0)]));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_book_needs_explicit_mid() {
        assert!(OrderBookSnapshot::new(vec![], vec![]).is_err());
        assert!(OrderBookSnapshot::with_mid_price(vec![], vec![], 10.0).is_ok());
    }

    #[test]
    fn test_deserialize_array_levels() {
        let json = r#"{"bids": [[100.0, 2.0], [99.5, 1.5]], "asks": [[100.5, 2.5]]}"#;
        let book: OrderBookSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(book.bids().len(), 2);
        assert_eq!(book.asks()[0], BookLevel::new(100.5, 2.5));
    }
}
