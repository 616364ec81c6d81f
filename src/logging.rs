//! Tracing setup
//!
//! The terminal belongs to the UI, so logs only go to a file:
//! `~/.sqlpane/logs/sqlpane.log`, rotated daily.
//!
//! `RUST_LOG` overrides the configured level, e.g.
//! `RUST_LOG=sqlpane::editor=debug` for mode changes and buffer loads.

use crate::config::ConnectionConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Directory holding the rotated log files
pub fn logs_dir() -> ConfigResult<PathBuf> {
    let dir = ConnectionConfig::config_dir()?.join("logs");
    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::Invalid(format!("{}: {}", dir.display(), e)))?;
    Ok(dir)
}

/// Filter from `RUST_LOG`, else `default_level`, else `info`.
pub fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// The returned guard flushes buffered lines on drop; keep it alive for the
/// whole run. `None` means file logging is unavailable and the app runs
/// without it.
pub fn init(default_level: &str) -> Option<WorkerGuard> {
    let dir = match logs_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            return None;
        }
    };

    let appender = tracing_appender::rolling::daily(dir, "sqlpane.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(build_filter(default_level))
        .with(file_layer)
        .init();

    Some(guard)
}
