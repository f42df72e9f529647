//! Core traits for the scoring engine.

mod indicator;
mod strategy;

pub use indicator::{Indicator, OhlcIndicator};
pub use strategy::{HorizonConfig, HorizonStrategy};
