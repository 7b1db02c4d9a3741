//! Tracing subscriber initialization.
//!
//! The terminal belongs to the page, so logs go to a file. Failed page loads
//! are recorded here with their full internal detail; watch them with
//! `tail -f`.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Log path has no usable file name
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Directory and file name a log path splits into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTarget {
    /// Directory holding the log file.
    pub directory: PathBuf,
    /// Log file name.
    pub file_name: String,
}

impl LogTarget {
    /// Split `log_path` into its directory and file name.
    ///
    /// A bare file name logs into the current directory.
    ///
    /// # Errors
    ///
    /// Returns `LoggingError::InvalidPath` if the path has no UTF-8 file name.
    pub fn from_path(log_path: &Path) -> Result<Self, LoggingError> {
        let file_name = log_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

        let directory = match log_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self {
            directory,
            file_name: file_name.to_string(),
        })
    }
}

/// Initialize the tracing subscriber with file-based logging.
///
/// Respects `RUST_LOG`, defaulting to [`DEFAULT_FILTER`]. Creates the log
/// directory if it doesn't exist.
///
/// # Errors
///
/// Returns an error if the path is unusable, the directory cannot be created,
/// or a global subscriber is already installed.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let target = LogTarget::from_path(log_path)?;

    std::fs::create_dir_all(&target.directory).map_err(|source| {
        LoggingError::DirectoryCreation {
            path: target.directory.clone(),
            source,
        }
    })?;

    let file_appender = tracing_appender::rolling::never(&target.directory, &target.file_name);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false) // No ANSI colors in log files
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
