//! Error types for pkgview.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?` and
//! `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level process error (config, logging, terminal, output). Fatal.
//! - [`FetchError`] - Data-source failures for one page load. Never fatal.
//! - [`InvalidIdentifier`](super::identifiers::InvalidIdentifier) - Validator rejection. Never fatal.
//! - [`ClassifiedError`] - Any page-load failure tagged with an [`ErrorKind`], carrying the
//!   internal message for the operator log.
//!
//! # Recovery Strategy
//!
//! Page-load failures are caught at the boundary in [`crate::integration::load_page`]: the
//! full detail is logged and the user sees only a [`UserMessage`]. Only failures of the
//! process shell itself (bad config file, terminal I/O) propagate as [`AppError`].

use super::classify::{classify, UserMessage};
use super::identifiers::InvalidIdentifier;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Config file exists but could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing subscriber setup failed.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Writing the plain page to stdout failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// Terminal setup, drawing or event handling failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] crate::view::TuiError),
}

/// Failure reported by a data source.
///
/// The payload is an internal message. It is logged verbatim and classified,
/// never displayed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The backend could not produce a response (not found, auth, rate limit, ...).
    #[error("{0}")]
    Failure(String),

    /// The backend produced something that is not a well-formed insight document.
    #[error("Invalid response from server: {0}")]
    Malformed(String),
}

/// Kind of page-load failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Identifier rejected by the validator.
    InvalidIdentifier,
    /// Data source failed to produce a response.
    DataSourceFailure,
    /// Data source responded with a structurally invalid document.
    MalformedResponse,
}

impl ErrorKind {
    /// Stable snake_case name, used as a log field.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidIdentifier => "invalid_identifier",
            ErrorKind::DataSourceFailure => "data_source_failure",
            ErrorKind::MalformedResponse => "malformed_response",
        }
    }
}

/// A page-load failure with its kind and the unredacted internal message.
///
/// `internal` is for the operator log only; use [`ClassifiedError::user_message`] for
/// anything shown on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    kind: ErrorKind,
    internal: String,
}

impl ClassifiedError {
    /// Tag an internal message with its kind.
    pub fn new(kind: ErrorKind, internal: impl Into<String>) -> Self {
        Self {
            kind,
            internal: internal.into(),
        }
    }

    /// What failed.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Unredacted message, for the log only.
    pub fn internal_message(&self) -> &str {
        &self.internal
    }

    /// The user-safe message for this failure.
    ///
    /// Validator rejections always map to [`UserMessage::InvalidInput`]. Data-source
    /// failures (malformed responses included) go through [`classify`].
    pub fn user_message(&self) -> UserMessage {
        match self.kind {
            ErrorKind::InvalidIdentifier => UserMessage::InvalidInput,
            ErrorKind::DataSourceFailure | ErrorKind::MalformedResponse => {
                classify(&self.internal)
            }
        }
    }
}

impl From<InvalidIdentifier> for ClassifiedError {
    fn from(err: InvalidIdentifier) -> Self {
        Self::new(ErrorKind::InvalidIdentifier, err.to_string())
    }
}

impl From<FetchError> for ClassifiedError {
    fn from(err: FetchError) -> Self {
        let kind = match err {
            FetchError::Failure(_) => ErrorKind::DataSourceFailure,
            FetchError::Malformed(_) => ErrorKind::MalformedResponse,
        };
        Self::new(kind, err.to_string())
    }
}
