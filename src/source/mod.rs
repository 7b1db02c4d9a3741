//! Insight data sources.
//!
//! This module provides the data-source collaborator behind the page:
//! - [`MockSource`] returns the fixed mock payload
//! - [`DirectorySource`] reads saved responses from disk
//! - [`parse_insight`] checks a raw response before anything renders it

use crate::model::{FetchError, PackageIdentifier, PackageInsight};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub mod directory;
pub mod mock;

pub use directory::DirectorySource;
pub use mock::MockSource;

/// Something that can answer an insight request.
///
/// One call per page load, no retry and no timeout: a single best-effort
/// attempt that either returns the raw document or fails.
pub trait DataSource {
    /// Fetch the raw insight document for a validated identifier.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Failure` when no response could be produced and
    /// `FetchError::Malformed` when the backend answered with garbage.
    fn fetch(&self, id: &PackageIdentifier) -> Result<Value, FetchError>;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn fetch(&self, id: &PackageIdentifier) -> Result<Value, FetchError> {
        (**self).fetch(id)
    }
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn fetch(&self, id: &PackageIdentifier) -> Result<Value, FetchError> {
        (**self).fetch(id)
    }
}

/// Validate and type a raw response.
///
/// The document must be a JSON object and must deserialize into
/// [`PackageInsight`]. Missing fields are fine; present fields of the wrong
/// shape are not.
///
/// # Errors
///
/// Returns `FetchError::Malformed` otherwise.
pub fn parse_insight(value: Value) -> Result<PackageInsight, FetchError> {
    if !value.is_object() {
        return Err(FetchError::Malformed(format!(
            "expected a JSON object, got {}",
            json_type_name(&value)
        )));
    }

    serde_json::from_value(value).map_err(|e| {
        // serde messages quote response values; keep them out of the classified text
        warn!(error = %e, "Response does not match the insight model");
        FetchError::Malformed("response does not match the insight model".to_string())
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Pick the data source for the resolved configuration.
///
/// A configured data directory wins; otherwise the mock answers.
pub fn select_source(data_dir: Option<PathBuf>, mock_latency: Duration) -> Box<dyn DataSource> {
    match data_dir {
        Some(root) => Box::new(DirectorySource::new(root)),
        None => Box::new(MockSource::new(mock_latency)),
    }
}
