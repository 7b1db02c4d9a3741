//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors or pure
//! functions over them. Nothing here performs I/O.

pub mod classify;
pub mod error;
pub mod identifiers;
pub mod insight;
pub mod key_action;

// Re-export for convenience
pub use classify::{classify, UserMessage};
pub use error::{AppError, ClassifiedError, ErrorKind, FetchError};
pub use identifiers::{
    IdentifierField, InvalidIdentifier, PackageIdentifier, SanitizedDisplayIdentifier,
    MAX_ECOSYSTEM_LEN, MAX_NAME_LEN, MAX_VERSION_LEN,
};
pub use insight::{
    CheckStatus, Dependency, License, PackageInsight, Project, ProjectInsight, ScoreBand,
    Scorecard, ScorecardCheck, Severity, Vulnerability,
};
pub use key_action::KeyAction;
