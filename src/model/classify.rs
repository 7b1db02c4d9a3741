//! Mapping from internal failure text to user-safe messages.
//!
//! Internal error strings can carry backend hints, credential diagnostics or
//! raw payload fragments. Nothing from them reaches the screen: [`classify`]
//! reduces any message to one of five fixed texts.

use std::fmt;

/// Fixed set of messages that may be shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserMessage {
    /// The package does not exist.
    NotFound,
    /// The request or response was rejected as invalid.
    InvalidInput,
    /// The backend refused our credentials.
    Authentication,
    /// The backend is throttling requests.
    RateLimited,
    /// Anything else.
    Generic,
}

impl UserMessage {
    /// Fixed text shown to the user.
    pub fn as_str(self) -> &'static str {
        match self {
            UserMessage::NotFound => {
                "This package was not found. Please check the name and version."
            }
            UserMessage::InvalidInput => "Invalid package information. Please check your input.",
            UserMessage::Authentication => "Server authentication error. Please try again later.",
            UserMessage::RateLimited => "Too many requests. Please try again in a moment.",
            UserMessage::Generic => "Failed to load package information. Please try again later.",
        }
    }
}

impl fmt::Display for UserMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered substring rules. First match wins.
const RULES: &[(&[&str], UserMessage)] = &[
    (&["not found"], UserMessage::NotFound),
    (&["invalid"], UserMessage::InvalidInput),
    (&["auth", "credential"], UserMessage::Authentication),
    (&["rate limit"], UserMessage::RateLimited),
];

/// Classify an internal error message.
///
/// Case-insensitive substring match against the rule table in order; falls
/// back to [`UserMessage::Generic`]. Pure and total.
pub fn classify(internal_message: &str) -> UserMessage {
    let message = internal_message.to_lowercase();

    RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| message.contains(needle)))
        .map(|(_, user_message)| *user_message)
        .unwrap_or(UserMessage::Generic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message() {
        assert_eq!(
            classify("Package not found in registry"),
            UserMessage::NotFound
        );
        assert_eq!(
            classify("Package not found in registry").as_str(),
            "This package was not found. Please check the name and version."
        );
    }

    #[test]
    fn unmatched_message_falls_back_to_generic() {
        assert_eq!(classify("unexpected database timeout"), UserMessage::Generic);
        assert_eq!(
            UserMessage::Generic.to_string(),
            "Failed to load package information. Please try again later."
        );
    }

    #[test]
    fn empty_message_is_generic() {
        assert_eq!(classify(""), UserMessage::Generic);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("NOT FOUND"), UserMessage::NotFound);
        assert_eq!(classify("Invalid Response"), UserMessage::InvalidInput);
        assert_eq!(classify("Rate Limit exceeded"), UserMessage::RateLimited);
    }

    #[test]
    fn auth_and_credential_both_map_to_authentication() {
        assert_eq!(classify("401 unauthorized"), UserMessage::Authentication);
        assert_eq!(classify("missing credentials"), UserMessage::Authentication);
        assert_eq!(classify("OAuth token expired"), UserMessage::Authentication);
    }

    #[test]
    fn not_found_wins_over_invalid() {
        assert_eq!(
            classify("invalid key: package not found"),
            UserMessage::NotFound
        );
    }

    #[test]
    fn invalid_wins_over_auth() {
        assert_eq!(classify("invalid auth token"), UserMessage::InvalidInput);
    }

    #[test]
    fn auth_wins_over_rate_limit() {
        assert_eq!(
            classify("rate limit reached for unauthenticated clients"),
            UserMessage::Authentication
        );
    }

    #[test]
    fn rate_limit_requires_the_full_phrase() {
        assert_eq!(classify("rate exceeded, limit 60"), UserMessage::Generic);
        assert_eq!(classify("hit the rate limit"), UserMessage::RateLimited);
    }

    #[test]
    fn user_message_text_matches_table() {
        insta::assert_snapshot!(
            UserMessage::InvalidInput,
            @"Invalid package information. Please check your input."
        );
        insta::assert_snapshot!(
            UserMessage::Authentication,
            @"Server authentication error. Please try again later."
        );
        insta::assert_snapshot!(
            UserMessage::RateLimited,
            @"Too many requests. Please try again in a moment."
        );
    }
}
