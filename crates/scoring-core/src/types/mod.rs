//! Core data types for the scoring engine.

mod bar;
mod horizon;
mod indicator;
mod order_book;
mod signal;

pub use bar::{Bar, PriceSeries};
pub use horizon::{Direction, Horizon, HorizonScore, DIRECTION_DEADBAND};
pub use indicator::{
    BollingerOutput, Crossover, IndicatorResult, MacdOutput, MacdState, ObvState, Reading,
    StochasticOutput, SupportResistance,
};
pub use order_book::{BookLevel, BookSide, OrderBookSignal, OrderBookSnapshot, Wall};
pub use signal::{Agreement, AssetSignal, Classification, ClassificationThresholds};
