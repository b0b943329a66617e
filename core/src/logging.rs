//! Tracing subscriber setup
//!
//! Console output always, plus a daily rolling file when a log folder is
//! configured (the `LogFileFolder` setting).

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use thiserror::Error;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Base name of the rolling log file
pub const LOG_FILE_NAME: &str = "conform.log";

/// Directory holding the log files, once file logging is active
static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Global log file guard (keeps file writer alive)
static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Cannot create log directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("A global tracing subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}

/// Install the process-wide tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, `info` otherwise. An empty
/// `log_dir` is treated the same as `None`.
pub fn init_logging(log_dir: Option<&Path>) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = fmt::layer().with_target(false);

    match log_dir.filter(|p| !p.as_os_str().is_empty()) {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|source| LoggingError::Directory {
                path: dir.to_path_buf(),
                source,
            })?;

            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let file_layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(non_blocking);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .with(file_layer)
                .try_init()
                .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

            LOG_GUARD.set(guard).ok();
            LOG_DIR.set(dir.to_path_buf()).ok();
            tracing::info!("Logging to {}", dir.display());
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .try_init()
                .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;
        }
    }

    Ok(())
}

/// Directory receiving log files, if file logging was enabled
pub fn log_directory() -> Option<&'static Path> {
    LOG_DIR.get().map(|p| p.as_path())
}
