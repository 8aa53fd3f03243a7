//! Log to a daily file so the terminal stays free for the view.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use popcorn_core::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("cannot create log directory {}: {source}", path.display())]
    Dir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot open log file: {0}")]
    Appender(#[from] InitError),
    #[error("cannot install logger: {0}")]
    Subscriber(String),
}

/// Install the global subscriber. Keep the guard alive until exit so
/// buffered lines are flushed.
pub fn init(level: &str) -> Result<WorkerGuard, LogError> {
    let (writer, guard) = file_writer(&AppConfig::log_dir())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("popcorn={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| LogError::Subscriber(e.to_string()))?;

    Ok(guard)
}

/// Daily-rotated `popcorn.log` in `dir`, created if missing.
fn file_writer(dir: &Path) -> Result<(NonBlocking, WorkerGuard), LogError> {
    std::fs::create_dir_all(dir).map_err(|source| LogError::Dir {
        path: dir.to_path_buf(),
        source,
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("popcorn")
        .filename_suffix("log")
        .build(dir)?;

    Ok(tracing_appender::non_blocking(appender))
}
