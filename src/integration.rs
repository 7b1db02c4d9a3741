//! Page-load boundary.
//!
//! Raw identifiers go in, a [`PageOutcome`] comes out. Everything that can fail
//! on the way (validation, fetch, response shape) is caught here: the
//! unredacted error and the raw identifiers are logged, the outcome carries
//! only a [`UserMessage`].

use crate::model::{
    ClassifiedError, PackageIdentifier, PackageInsight, SanitizedDisplayIdentifier, UserMessage,
};
use crate::source::{parse_insight, DataSource};
use tracing::{error, info};

/// Result of loading one package page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// Identifier valid and insight fetched.
    Loaded {
        /// The validated request.
        identifier: PackageIdentifier,
        /// Parsed response.
        insight: Box<PackageInsight>,
    },
    /// Something failed; only the user-safe message survives.
    Failed {
        /// Message to render.
        message: UserMessage,
    },
}

impl PageOutcome {
    /// True when the insight was fetched.
    pub fn is_loaded(&self) -> bool {
        matches!(self, PageOutcome::Loaded { .. })
    }

    /// The insight, when loaded.
    pub fn insight(&self) -> Option<&PackageInsight> {
        match self {
            PageOutcome::Loaded { insight, .. } => Some(insight.as_ref()),
            PageOutcome::Failed { .. } => None,
        }
    }

    /// The user-safe message, when loading failed.
    pub fn user_message(&self) -> Option<UserMessage> {
        match self {
            PageOutcome::Loaded { .. } => None,
            PageOutcome::Failed { message } => Some(*message),
        }
    }
}

/// Validate, fetch and check one package page.
///
/// Never fails: every error is logged with full detail and turned into
/// [`PageOutcome::Failed`].
pub fn load_page(
    source: &dyn DataSource,
    ecosystem: &str,
    name: &str,
    version: &str,
) -> PageOutcome {
    match try_load(source, ecosystem, name, version) {
        Ok((identifier, insight)) => {
            info!(
                package = %identifier,
                vulnerabilities = insight.vulnerabilities().len(),
                dependencies = insight.dependencies().len(),
                "Package insight loaded"
            );
            PageOutcome::Loaded {
                identifier,
                insight: Box::new(insight),
            }
        }
        Err(err) => {
            error!(
                kind = err.kind().as_str(),
                error = err.internal_message(),
                ecosystem,
                name,
                version,
                "Package page error"
            );
            PageOutcome::Failed {
                message: err.user_message(),
            }
        }
    }
}

fn try_load(
    source: &dyn DataSource,
    ecosystem: &str,
    name: &str,
    version: &str,
) -> Result<(PackageIdentifier, PackageInsight), ClassifiedError> {
    let identifier = PackageIdentifier::validate(ecosystem, name, version)?;
    let raw = source.fetch(&identifier)?;
    let insight = parse_insight(raw)?;
    Ok((identifier, insight))
}

/// Window title for a page, built from the raw request.
///
/// Uses the sanitized projection so it is safe for invalid input too.
pub fn page_title(name: &str, version: &str) -> String {
    SanitizedDisplayIdentifier::new(name, version).title()
}

/// One-line page description, sanitized like [`page_title`].
pub fn page_description(name: &str, version: &str) -> String {
    SanitizedDisplayIdentifier::new(name, version).description()
}
