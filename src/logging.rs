//! Logging configuration using the tracing ecosystem.
//!
//! Log output goes to a daily-rotating file so it never draws over the
//! terminal UI. The filter comes from `--log-level`, then `RUST_LOG`, then
//! the built-in default.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log filter if neither `--log-level` nor `RUST_LOG` is set.
const DEFAULT_LOG_FILTER: &str = "issuedeck=info,warn";

/// Log file name prefix.
const LOG_FILE_NAME: &str = "issuedeck.log";

/// Initialize the logging system.
///
/// Logs are written through a non-blocking writer; the returned guard must
/// be held until shutdown so buffered lines are flushed.
///
/// Logs are stored in the platform-specific local data directory:
/// - Linux: `~/.local/share/issuedeck/logs/`
/// - macOS: `~/Library/Application Support/issuedeck/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\issuedeck\logs\`
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created,
/// the filter is invalid, or a global subscriber is already set.
pub fn init(level: Option<&str>) -> anyhow::Result<WorkerGuard> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let (writer, guard) = tracing_appender::non_blocking(file_appender(&log_dir));
    let filter = build_filter(level)?;

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "issuedeck starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(guard)
}

/// Build the daily-rotating appender in `dir`.
fn file_appender(dir: &Path) -> RollingFileAppender {
    RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_NAME)
}

/// Build the level filter, preferring an explicit directive.
fn build_filter(level: Option<&str>) -> anyhow::Result<EnvFilter> {
    match level {
        Some(directive) => Ok(EnvFilter::try_new(directive)?),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))),
    }
}

/// Get the log directory path.
fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("issuedeck").join("logs"))
}

/// Get the path where logs are stored, for display to users.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("issuedeck shutting down");
}
