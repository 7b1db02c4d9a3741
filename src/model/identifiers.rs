//! Package identifier newtypes with smart constructors.
//!
//! The `(ecosystem, name, version)` triple arrives from the command line and is
//! treated as untrusted. [`PackageIdentifier::validate`] is the only way to build
//! one, so every downstream consumer (data sources, lookup paths, cache keys)
//! receives an identifier that already passed the presence, length and
//! character checks.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Maximum ecosystem length in characters.
pub const MAX_ECOSYSTEM_LEN: usize = 50;
/// Maximum package name length in characters.
pub const MAX_NAME_LEN: usize = 256;
/// Maximum version length in characters.
pub const MAX_VERSION_LEN: usize = 128;

/// Characters that may never appear in any identifier field.
static DISALLOWED_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[<>:"/\\|?*]"#).expect("disallowed-character pattern is valid")
});

/// One of the three identifier fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierField {
    /// Package ecosystem, e.g. `npm`.
    Ecosystem,
    /// Package name.
    Name,
    /// Package version.
    Version,
}

impl IdentifierField {
    /// All fields, in check order.
    pub const ALL: [IdentifierField; 3] = [
        IdentifierField::Ecosystem,
        IdentifierField::Name,
        IdentifierField::Version,
    ];

    /// Maximum raw length in characters.
    pub fn max_len(self) -> usize {
        match self {
            IdentifierField::Ecosystem => MAX_ECOSYSTEM_LEN,
            IdentifierField::Name => MAX_NAME_LEN,
            IdentifierField::Version => MAX_VERSION_LEN,
        }
    }

    /// Lower-case field name used in messages.
    pub fn as_str(self) -> &'static str {
        match self {
            IdentifierField::Ecosystem => "ecosystem",
            IdentifierField::Name => "name",
            IdentifierField::Version => "version",
        }
    }
}

impl fmt::Display for IdentifierField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failure for a package identifier.
///
/// Every variant renders with the "Invalid package parameters" prefix so the
/// message classifies as invalid input. The detail after the colon is for the
/// operator log only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidIdentifier {
    /// Field is empty or whitespace-only.
    #[error("Invalid package parameters: {field} is empty")]
    Empty {
        /// Offending field.
        field: IdentifierField,
    },

    /// Raw field length exceeds its bound.
    #[error("Invalid package parameters: {field} is {length} characters (max {max})")]
    TooLong {
        /// Offending field.
        field: IdentifierField,
        /// Raw length in characters.
        length: usize,
        /// Bound for the field.
        max: usize,
    },

    /// Field contains one of `< > : " / \ | ? *`.
    #[error("Invalid package parameters: {field} contains a disallowed character")]
    DisallowedCharacter {
        /// Offending field.
        field: IdentifierField,
    },
}

impl InvalidIdentifier {
    /// The field that failed validation.
    pub fn field(&self) -> IdentifierField {
        match self {
            InvalidIdentifier::Empty { field }
            | InvalidIdentifier::TooLong { field, .. }
            | InvalidIdentifier::DisallowedCharacter { field } => *field,
        }
    }
}

/// A validated `(ecosystem, name, version)` triple.
/// NEVER export the constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageIdentifier {
    ecosystem: String,
    name: String,
    version: String,
}

impl PackageIdentifier {
    /// Smart constructor: validates all three fields.
    ///
    /// Checks run in a fixed order and the first failure wins:
    /// 1. presence (trimmed field must be non-empty)
    /// 2. length (raw, untrimmed character count)
    /// 3. disallowed characters
    ///
    /// Valid input is stored unchanged (no trimming, no case folding).
    pub fn validate(
        ecosystem: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, InvalidIdentifier> {
        let candidate = Self {
            ecosystem: ecosystem.into(),
            name: name.into(),
            version: version.into(),
        };

        for field in IdentifierField::ALL {
            if candidate.get(field).trim().is_empty() {
                return Err(InvalidIdentifier::Empty { field });
            }
        }

        for field in IdentifierField::ALL {
            let length = candidate.get(field).chars().count();
            let max = field.max_len();
            if length > max {
                return Err(InvalidIdentifier::TooLong { field, length, max });
            }
        }

        for field in IdentifierField::ALL {
            if DISALLOWED_CHARS.is_match(candidate.get(field)) {
                return Err(InvalidIdentifier::DisallowedCharacter { field });
            }
        }

        Ok(candidate)
    }

    /// Ecosystem as given.
    pub fn ecosystem(&self) -> &str {
        &self.ecosystem
    }

    /// Name as given.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version as given.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Field value by tag.
    pub fn get(&self, field: IdentifierField) -> &str {
        match field {
            IdentifierField::Ecosystem => &self.ecosystem,
            IdentifierField::Name => &self.name,
            IdentifierField::Version => &self.version,
        }
    }
}

impl fmt::Display for PackageIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.ecosystem, self.name, self.version)
    }
}

/// Display-only projection of a package name and version.
///
/// Strips everything outside `[a-zA-Z0-9._-]`. Built from raw, possibly
/// invalid input, so it is only ever used for titles and never for lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedDisplayIdentifier {
    name: String,
    version: String,
}

impl SanitizedDisplayIdentifier {
    /// Project raw, possibly invalid, name and version.
    pub fn new(raw_name: &str, raw_version: &str) -> Self {
        Self {
            name: sanitize_or(raw_name, "Package"),
            version: sanitize_or(raw_version, "unknown"),
        }
    }

    /// Sanitized name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sanitized version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Window title, e.g. `express - Package Viewer`.
    pub fn title(&self) -> String {
        format!("{} - Package Viewer", self.name)
    }

    /// One-line description, e.g. `Security information for express 4.10.5`.
    pub fn description(&self) -> String {
        format!("Security information for {} {}", self.name, self.version)
    }
}

fn sanitize_or(raw: &str, fallback: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    if kept.is_empty() {
        fallback.to_string()
    } else {
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== PackageIdentifier::validate =====

    #[test]
    fn validate_accepts_plain_identifier() {
        let id = PackageIdentifier::validate("npm", "express", "4.10.5").unwrap();
        assert_eq!(id.ecosystem(), "npm");
        assert_eq!(id.name(), "express");
        assert_eq!(id.version(), "4.10.5");
    }

    #[test]
    fn validate_keeps_surrounding_whitespace() {
        let id = PackageIdentifier::validate(" npm", "express ", "4.10.5").unwrap();
        assert_eq!(id.ecosystem(), " npm");
        assert_eq!(id.name(), "express ");
    }

    #[test]
    fn validate_rejects_empty_name() {
        let err = PackageIdentifier::validate("npm", "", "4.10.5").unwrap_err();
        assert_eq!(
            err,
            InvalidIdentifier::Empty {
                field: IdentifierField::Name
            }
        );
    }

    #[test]
    fn validate_rejects_whitespace_only_version() {
        let err = PackageIdentifier::validate("npm", "express", " \t\n").unwrap_err();
        assert_eq!(err.field(), IdentifierField::Version);
        assert!(matches!(err, InvalidIdentifier::Empty { .. }));
    }

    #[test]
    fn validate_reports_first_empty_field_in_order() {
        let err = PackageIdentifier::validate("", "", "").unwrap_err();
        assert_eq!(err.field(), IdentifierField::Ecosystem);
    }

    #[test]
    fn validate_accepts_fields_at_exact_bounds() {
        let id = PackageIdentifier::validate(
            "e".repeat(MAX_ECOSYSTEM_LEN),
            "n".repeat(MAX_NAME_LEN),
            "v".repeat(MAX_VERSION_LEN),
        );
        assert!(id.is_ok(), "fields at their maximum length are valid");
    }

    #[test]
    fn validate_rejects_name_over_bound() {
        let err = PackageIdentifier::validate("npm", "a".repeat(300), "4.10.5").unwrap_err();
        assert_eq!(
            err,
            InvalidIdentifier::TooLong {
                field: IdentifierField::Name,
                length: 300,
                max: MAX_NAME_LEN,
            }
        );
    }

    #[test]
    fn validate_rejects_ecosystem_over_bound() {
        let err = PackageIdentifier::validate("e".repeat(51), "express", "1").unwrap_err();
        assert!(matches!(
            err,
            InvalidIdentifier::TooLong {
                field: IdentifierField::Ecosystem,
                ..
            }
        ));
    }

    #[test]
    fn validate_rejects_version_over_bound() {
        let err = PackageIdentifier::validate("npm", "express", "1".repeat(129)).unwrap_err();
        assert_eq!(err.field(), IdentifierField::Version);
    }

    #[test]
    fn validate_measures_length_in_characters_not_bytes() {
        // 50 two-byte characters = 100 bytes, still within the 50-char bound
        let ecosystem = "é".repeat(MAX_ECOSYSTEM_LEN);
        assert!(PackageIdentifier::validate(ecosystem, "express", "1.0.0").is_ok());
    }

    #[test]
    fn validate_measures_raw_length_before_trimming() {
        // Trimmed it fits, raw it does not
        let padded = format!("{}{}", " ".repeat(10), "n".repeat(MAX_NAME_LEN - 5));
        let err = PackageIdentifier::validate("npm", padded, "1.0.0").unwrap_err();
        assert!(matches!(err, InvalidIdentifier::TooLong { .. }));
    }

    #[test]
    fn validate_checks_presence_before_length() {
        // Whitespace-only AND over-long: presence wins
        let err = PackageIdentifier::validate("npm", " ".repeat(300), "1.0.0").unwrap_err();
        assert!(matches!(err, InvalidIdentifier::Empty { .. }));
    }

    #[test]
    fn validate_checks_length_before_characters() {
        let name = format!("{}/", "a".repeat(300));
        let err = PackageIdentifier::validate("npm", name, "1.0.0").unwrap_err();
        assert!(matches!(err, InvalidIdentifier::TooLong { .. }));
    }

    #[test]
    fn validate_rejects_each_disallowed_character() {
        for c in ['<', '>', ':', '"', '/', '\\', '|', '?', '*'] {
            let name = format!("express{c}evil");
            let err = PackageIdentifier::validate("npm", &name, "4.10.5").unwrap_err();
            assert_eq!(
                err,
                InvalidIdentifier::DisallowedCharacter {
                    field: IdentifierField::Name
                },
                "{c:?} should be rejected"
            );
        }
    }

    #[test]
    fn validate_rejects_path_traversal_in_version() {
        let err = PackageIdentifier::validate("npm", "express", "../../etc/passwd").unwrap_err();
        assert_eq!(err.field(), IdentifierField::Version);
    }

    #[test]
    fn validate_rejects_scoped_npm_names() {
        assert!(PackageIdentifier::validate("npm", "@types/node", "20.0.0").is_err());
    }

    #[test]
    fn validate_accepts_common_package_punctuation() {
        for name in ["lodash.merge", "is-number", "zope_interface", "@angular-core", "a+b"] {
            assert!(
                PackageIdentifier::validate("npm", name, "1.0.0-rc.1").is_ok(),
                "{name} should be accepted"
            );
        }
    }

    #[test]
    fn error_messages_carry_invalid_prefix() {
        let err = PackageIdentifier::validate("npm", "a/b", "1").unwrap_err();
        assert!(err.to_string().starts_with("Invalid package parameters"));
    }

    #[test]
    fn display_joins_fields() {
        let id = PackageIdentifier::validate("pypi", "django", "4.2.0").unwrap();
        assert_eq!(id.to_string(), "pypi/django@4.2.0");
    }

    // ===== SanitizedDisplayIdentifier =====

    #[test]
    fn sanitized_keeps_allowed_characters() {
        let display = SanitizedDisplayIdentifier::new("express", "4.10.5");
        assert_eq!(display.name(), "express");
        assert_eq!(display.version(), "4.10.5");
    }

    #[test]
    fn sanitized_strips_markup_and_separators() {
        let display = SanitizedDisplayIdentifier::new("<script>alert(1)</script>", "1.0/../x");
        assert_eq!(display.name(), "scriptalert1script");
        assert_eq!(display.version(), "1.0..x");
    }

    #[test]
    fn sanitized_falls_back_when_nothing_remains() {
        let display = SanitizedDisplayIdentifier::new("///", "");
        assert_eq!(display.name(), "Package");
        assert_eq!(display.version(), "unknown");
    }

    #[test]
    fn sanitized_strips_non_ascii_letters() {
        let display = SanitizedDisplayIdentifier::new("pâte", "1");
        assert_eq!(display.name(), "pte");
    }

    #[test]
    fn sanitized_title_and_description() {
        let display = SanitizedDisplayIdentifier::new("express", "4.10.5");
        assert_eq!(display.title(), "express - Package Viewer");
        assert_eq!(
            display.description(),
            "Security information for express 4.10.5"
        );
    }
}
