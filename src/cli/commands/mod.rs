//! CLI command implementations.

pub mod evaluate;
pub mod horizons;
pub mod scan;
pub mod validate;
