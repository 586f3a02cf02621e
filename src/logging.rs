//! Tracing subscriber setup.

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LoggingConfig;

/// Log file name prefix inside the log directory.
const LOG_FILE_PREFIX: &str = "sales-desk.log";

/// Directory for rolling log files, if the platform provides one.
pub fn log_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "sales-desk", "Sales Desk").map(|dirs| dirs.data_local_dir().join("logs"))
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level. The returned guard must be kept
/// alive for the file writer to flush.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (file_layer, guard) = match config.file_logging.then(log_dir).flatten() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}
