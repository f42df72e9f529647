//! Horizon registry and the per-horizon settings bundle.

use scoring_core::{Horizon, HorizonConfig, HorizonStrategy, ScoringError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{
    IntradayConfig, IntradayStrategy, LongTermConfig, LongTermStrategy, MediumTermConfig,
    MediumTermStrategy, ShortTermConfig, ShortTermStrategy,
};

/// Configuration of all four horizons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HorizonSettings {
    pub intraday: IntradayConfig,
    pub short: ShortTermConfig,
    pub medium: MediumTermConfig,
    pub long: LongTermConfig,
}

impl HorizonSettings {
    pub fn validate(&self) -> Result<(), ScoringError> {
        self.intraday.validate()?;
        self.short.validate()?;
        self.medium.validate()?;
        self.long.validate()?;
        Ok(())
    }

    /// One strategy per horizon, in [`Horizon::ALL`] order.
    pub fn build(&self) -> Vec<Box<dyn HorizonStrategy>> {
        vec![
            Box::new(IntradayStrategy::new(self.intraday.clone())),
            Box::new(ShortTermStrategy::new(self.short.clone())),
            Box::new(MediumTermStrategy::new(self.medium.clone())),
            Box::new(LongTermStrategy::new(self.long.clone())),
        ]
    }
}

/// Information about a registered horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorizonInfo {
    pub horizon: Horizon,
    /// Display name
    pub name: String,
    pub holding_period: String,
    pub description: String,
    /// Indicators the horizon cannot be scored without
    pub requires: Vec<String>,
    /// Default configuration as JSON
    pub default_config: serde_json::Value,
}

/// Registry for the built-in horizon strategies.
pub struct HorizonRegistry {
    horizons: BTreeMap<Horizon, HorizonInfo>,
}

impl HorizonRegistry {
    /// Create a registry with all built-in horizons.
    pub fn new() -> Self {
        let defaults = HorizonSettings::default();
        let configs = [
            (Horizon::Intraday, config_json(&defaults.intraday)),
            (Horizon::Short, config_json(&defaults.short)),
            (Horizon::Medium, config_json(&defaults.medium)),
            (Horizon::Long, config_json(&defaults.long)),
        ];

        let horizons = defaults
            .build()
            .into_iter()
            .zip(configs)
            .map(|(strategy, (horizon, default_config))| {
                let info = HorizonInfo {
                    horizon,
                    name: strategy.name().to_string(),
                    holding_period: horizon.holding_period().to_string(),
                    description: strategy.description().to_string(),
                    requires: strategy
                        .required_indicators()
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                    default_config,
                };
                (horizon, info)
            })
            .collect();

        Self { horizons }
    }

    /// List all horizons in aggregation order.
    pub fn list(&self) -> Vec<&HorizonInfo> {
        self.horizons.values().collect()
    }
}

impl Default for HorizonRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn config_json<T: Serialize>(config: &T) -> serde_json::Value {
    serde_json::to_value(config).unwrap_or_default()
}
