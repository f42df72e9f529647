//! Configuration structures.

use scoring_core::ScoringError;
use scoring_engine::{AlertThresholds, EngineConfig, WeightOverrides};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    /// Per-asset settings keyed by asset id
    #[serde(default)]
    pub assets: BTreeMap<String, AssetSettings>,
}

impl AppConfig {
    /// Check every section, naming the offending asset where relevant.
    pub fn validate(&self) -> Result<(), ScoringError> {
        self.logging.validate()?;
        self.engine.validate()?;

        for (id, asset) in &self.assets {
            asset
                .alerts
                .validate()
                .map_err(|e| ScoringError::Config(format!("assets.{id}: {e}")))?;
            if !asset.weights.is_empty() {
                self.engine
                    .weights
                    .merge(&asset.weights)
                    .map_err(|e| ScoringError::Config(format!("assets.{id}: {e}")))?;
            }
        }
        Ok(())
    }

    /// Settings for an asset.
    ///
    /// Keys may come back lowercased from layered sources, so the lookup
    /// falls back to a case-insensitive match.
    pub fn asset(&self, id: &str) -> Option<&AssetSettings> {
        self.assets.get(id).or_else(|| {
            self.assets
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(id))
                .map(|(_, settings)| settings)
        })
    }

    /// Asset settings, or the defaults for an unconfigured asset.
    pub fn asset_or_default(&self, id: &str) -> AssetSettings {
        self.asset(id).cloned().unwrap_or_default()
    }

    /// The configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "signal-scoring".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Also write logs to this file
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }

    fn validate(&self) -> Result<(), ScoringError> {
        if !matches!(self.format.to_ascii_lowercase().as_str(), "pretty" | "json") {
            return Err(ScoringError::Config(format!(
                "logging.format must be 'pretty' or 'json', got '{}'",
                self.format
            )));
        }
        Ok(())
    }
}

/// Market an asset trades in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    #[default]
    Stock,
    Crypto,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Stock => write!(f, "stock"),
            AssetKind::Crypto => write!(f, "crypto"),
        }
    }
}

/// Settings for one monitored asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetSettings {
    /// Display name
    pub name: Option<String>,
    pub kind: AssetKind,
    pub alerts: AlertThresholds,
    pub weights: WeightOverrides,
    /// Refuse to score the asset without an order book snapshot
    pub require_order_book: bool,
}

impl AssetSettings {
    /// Weight overrides, if any are set.
    pub fn weight_overrides(&self) -> Option<&WeightOverrides> {
        (!self.weights.is_empty()).then_some(&self.weights)
    }
}
