//! Alert notification through the log.

use scoring_engine::{Alert, AlertSummary, Severity};
use tracing::{info, warn};

/// One-line rendering of an alert.
pub fn alert_line(alert: &Alert) -> String {
    let severity = match alert.severity {
        Severity::High => "HIGH",
        Severity::Medium => "MEDIUM",
        Severity::Low => "LOW",
    };
    format!(
        "[{severity}] {} {}: {}",
        alert.timestamp.format("%Y-%m-%d %H:%M"),
        alert.kind,
        alert.message
    )
}

/// Emit every alert as a log event and return the batch summary.
///
/// High severity alerts are logged at warn level so they stand out in
/// filtered output.
pub fn notify_alerts(alerts: &[Alert]) -> AlertSummary {
    for alert in alerts {
        match alert.severity {
            Severity::High => warn!(
                asset = %alert.asset_id,
                kind = %alert.kind,
                price = %alert.price,
                "{}",
                alert.message
            ),
            Severity::Medium | Severity::Low => info!(
                asset = %alert.asset_id,
                kind = %alert.kind,
                price = %alert.price,
                "{}",
                alert.message
            ),
        }
    }

    let summary = AlertSummary::from_alerts(alerts);
    if summary.should_notify {
        warn!(
            total = summary.total,
            high_severity = summary.high_severity,
            "Alerts require attention"
        );
    }
    summary
}
