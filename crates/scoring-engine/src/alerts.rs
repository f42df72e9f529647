//! Price and signal alerts.
//!
//! Alert checks decide what the notification side should hear about: price
//! levels crossed, unusually large moves, and signals strong enough to act on.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use scoring_core::{AssetSignal, Classification, PriceSeries, ScoringError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Per-asset alert thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlertThresholds {
    /// Alert when price reaches or exceeds this level
    pub high: Option<Decimal>,
    /// Alert when price falls to or below this level
    pub low: Option<Decimal>,
    /// Alert on a bar-to-bar move of at least this many percent
    pub change_percent: Decimal,
    /// Alert on signals at least this strong, on either side
    pub min_classification: Option<Classification>,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            high: None,
            low: None,
            change_percent: dec!(10),
            min_classification: Some(Classification::StrongBuy),
        }
    }
}

impl AlertThresholds {
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.change_percent <= Decimal::ZERO {
            return Err(ScoringError::Config(
                "alerts.change_percent must be positive".into(),
            ));
        }
        if let (Some(high), Some(low)) = (self.high, self.low) {
            if low >= high {
                return Err(ScoringError::Config(format!(
                    "alerts.low ({low}) must be below alerts.high ({high})"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    HighThreshold,
    LowThreshold,
    SignificantMove,
    Signal,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertKind::HighThreshold => "high_threshold",
            AlertKind::LowThreshold => "low_threshold",
            AlertKind::SignificantMove => "significant_move",
            AlertKind::Signal => "signal",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A triggered alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub asset_id: String,
    pub kind: AlertKind,
    pub severity: Severity,
    pub message: String,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// Checks prices and signals against [`AlertThresholds`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertChecker;

impl AlertChecker {
    pub fn new() -> Self {
        Self
    }

    /// Threshold and move alerts for a price, given the previous price.
    pub fn check_price(
        &self,
        asset_id: &str,
        price: Decimal,
        previous: Option<Decimal>,
        timestamp: DateTime<Utc>,
        thresholds: &AlertThresholds,
    ) -> Vec<Alert> {
        let mut alerts = Vec::new();
        let alert = |kind, severity, message: String| Alert {
            asset_id: asset_id.to_string(),
            kind,
            severity,
            message,
            price,
            timestamp,
        };

        if let Some(high) = thresholds.high {
            if price >= high {
                alerts.push(alert(
                    AlertKind::HighThreshold,
                    Severity::High,
                    format!("{asset_id} reached {price}, at or above the high threshold {high}"),
                ));
            }
        }
        if let Some(low) = thresholds.low {
            if price <= low {
                alerts.push(alert(
                    AlertKind::LowThreshold,
                    Severity::High,
                    format!("{asset_id} fell to {price}, at or below the low threshold {low}"),
                ));
            }
        }
        // A move too large for Decimal is skipped rather than reported
        let change = previous.filter(|p| !p.is_zero()).and_then(|previous| {
            price
                .checked_sub(previous)
                .and_then(|d| d.checked_div(previous))
                .and_then(|r| r.checked_mul(dec!(100)))
        });
        if let Some(change) = change {
            if change.abs() >= thresholds.change_percent {
                alerts.push(alert(
                    AlertKind::SignificantMove,
                    Severity::Medium,
                    format!("{asset_id} moved {:+}% to {price}", change.round_dp(2)),
                ));
            }
        }

        alerts
    }

    /// Alert when the signal reaches the configured strength.
    pub fn check_signal(&self, signal: &AssetSignal, thresholds: &AlertThresholds) -> Option<Alert> {
        let min = thresholds.min_classification?;
        let classification = signal.classification;
        if classification == Classification::Neutral
            || classification.intensity() < min.intensity()
        {
            return None;
        }

        let severity = if classification.intensity() == 2 {
            Severity::High
        } else {
            Severity::Medium
        };
        Some(Alert {
            asset_id: signal.asset_id.clone(),
            kind: AlertKind::Signal,
            severity,
            message: format!(
                "{} signal for {} (score {:+.2}, agreement {})",
                classification, signal.asset_id, signal.final_score, signal.agreement
            ),
            price: Decimal::ZERO,
            timestamp: signal.timestamp,
        })
    }

    /// All alerts for an evaluated asset: price checks on the last two
    /// closes plus the signal check.
    ///
    /// Closes that do not fit in a `Decimal` are not price checked.
    pub fn check(
        &self,
        series: &PriceSeries,
        signal: &AssetSignal,
        thresholds: &AlertThresholds,
    ) -> Vec<Alert> {
        let closes = series.closes();
        let to_decimal = |v: f64| Decimal::try_from(v).ok();
        let price = to_decimal(series.last().close);

        let mut alerts = match price {
            Some(price) => {
                let previous = closes
                    .len()
                    .checked_sub(2)
                    .and_then(|i| to_decimal(closes[i]));
                self.check_price(&signal.asset_id, price, previous, signal.timestamp, thresholds)
            }
            None => Vec::new(),
        };
        if let Some(mut alert) = self.check_signal(signal, thresholds) {
            alert.price = price.unwrap_or(Decimal::ZERO);
            alerts.push(alert);
        }
        alerts
    }
}

/// Counts of a batch of alerts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub total: usize,
    pub by_kind: BTreeMap<AlertKind, usize>,
    pub high_severity: usize,
    /// Whether any alert is worth a notification
    pub should_notify: bool,
}

impl AlertSummary {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        let mut by_kind = BTreeMap::new();
        for alert in alerts {
            *by_kind.entry(alert.kind).or_insert(0) += 1;
        }
        let high_severity = alerts
            .iter()
            .filter(|a| a.severity == Severity::High)
            .count();

        Self {
            total: alerts.len(),
            by_kind,
            high_severity,
            should_notify: high_severity > 0,
        }
    }
}
