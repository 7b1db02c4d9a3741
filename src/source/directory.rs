//! Data source backed by saved insight responses on disk.
//!
//! Layout: `<root>/<ecosystem>/<name>/<version>.json`. Validation does not
//! rule out `.` and `..`, so every field must also be a single plain path
//! component before it is joined under the root.
//!
//! Internal messages are fixed strings. Paths and I/O detail go to the log
//! as fields, never into the text the classifier reads.

use super::DataSource;
use crate::model::{FetchError, IdentifierField, PackageIdentifier};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Reads insight documents from a directory tree.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the saved responses live under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the saved response for `id`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Failure` when a field is `.`, `..` or otherwise
    /// not a single normal path component, so the path stays under the root.
    pub fn path_for(&self, id: &PackageIdentifier) -> Result<PathBuf, FetchError> {
        if let Some(field) = IdentifierField::ALL
            .into_iter()
            .find(|field| !is_single_component(id.get(*field)))
        {
            warn!(field = %field, "Identifier field is not a plain path component");
            return Err(FetchError::Failure(
                "invalid package path component".to_string(),
            ));
        }

        Ok(self
            .root
            .join(id.ecosystem())
            .join(id.name())
            .join(format!("{}.json", id.version())))
    }
}

fn is_single_component(field: &str) -> bool {
    let mut components = Path::new(field).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

impl DataSource for DirectorySource {
    fn fetch(&self, id: &PackageIdentifier) -> Result<Value, FetchError> {
        let path = self.path_for(id)?;
        debug!(path = %path.display(), "Reading saved insight");

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Saved insight unreadable");
            match e.kind() {
                ErrorKind::NotFound => {
                    FetchError::Failure("package not found in saved insights".to_string())
                }
                _ => FetchError::Failure("failed to read saved insight".to_string()),
            }
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Saved insight is not JSON");
            FetchError::Malformed("saved insight is not valid JSON".to_string())
        })
    }
}
