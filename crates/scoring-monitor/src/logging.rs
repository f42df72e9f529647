//! Logging setup.

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub use tracing_appender::non_blocking::WorkerGuard;

/// Setup logging with the given level.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn setup_logging(level: &str, json: bool) {
    init(level, json, None);
}

/// Setup logging to the console and to `file`.
///
/// File output is plain text written on a background thread. Keep the
/// returned guard alive until exit or buffered lines are lost.
pub fn setup_logging_with_file(level: &str, json: bool, file: &Path) -> io::Result<WorkerGuard> {
    let directory = match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(directory)?;

    let file_name = file.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("log file path has no file name: {}", file.display()),
        )
    })?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    init(level, json, Some(writer));
    Ok(guard)
}

fn init(level: &str, json: bool, file: Option<NonBlocking>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let console = if json {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().pretty().boxed()
    };
    let file_layer = file.map(|writer| fmt::layer().with_ansi(false).with_writer(writer));

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();
}
