//! File logging for the terminal client.
//!
//! The terminal is owned by the UI, so log output goes to a file under the
//! platform cache directory instead of stderr.
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE: &str = "client.log";

/// Directory holding the client log, `BOARD_LOG_DIR` when set.
pub fn log_directory() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("BOARD_LOG_DIR") {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("", "", "board")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .context("No home directory to place logs in; set BOARD_LOG_DIR")
}

/// Installs the global subscriber. Keep the returned guard alive for the
/// whole run; dropping it flushes and stops the writer.
pub fn setup_logging() -> Result<WorkerGuard> {
    let log_dir = log_directory()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    tracing::info!("Log file: {}", log_dir.join(LOG_FILE).display());

    Ok(guard)
}
