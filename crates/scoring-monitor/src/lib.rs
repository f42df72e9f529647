//! Logging setup and alert notification.

mod logging;
mod notify;

pub use logging::{setup_logging, setup_logging_with_file, WorkerGuard};
pub use notify::{alert_line, notify_alerts};
