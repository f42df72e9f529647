//! Signal aggregation engine.
//!
//! [`StrategyEngine`] runs the indicator library and the four horizon
//! evaluators over one asset's price series, blends in the order book
//! signal and classifies the result. Alert checks and multi-asset reports
//! work on the resulting [`AssetSignal`](scoring_core::AssetSignal)s.

pub mod alerts;
pub mod engine;
pub mod report;
pub mod weights;

pub use alerts::{Alert, AlertChecker, AlertKind, AlertSummary, AlertThresholds, Severity};
pub use engine::{EngineConfig, EvaluateOptions, StrategyEngine};
pub use report::SignalReport;
pub use weights::{HorizonWeights, WeightOverrides};
