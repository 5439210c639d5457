//! Schema identifier validation
//!
//! Both patterns are kept exactly as the registry has always applied them.
//! Two long-standing quirks are preserved on purpose and pinned by tests:
//!
//! - The version pattern escapes a literal backslash before the last dot, so
//!   `1.2.3` does NOT match while `1.2\.3` does. It is also unanchored.
//! - Under the default [`ValidationPolicy::RejectWhenBothInvalid`] a request is
//!   rejected only when *both* the name and the version fail. A bad name with a
//!   good version (or the reverse) is accepted and used to build a file path.
//!   Switch to [`ValidationPolicy::RejectWhenEitherInvalid`] to close that gap.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Message returned when an identifier is rejected
pub const INVALID_IDENTIFIER_MESSAGE: &str = "Schema name and/or version not valid";

/// Letters, digits and underscore only; the empty name matches
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]*$").unwrap());

/// Legacy version pattern, see module docs
static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+\.[0-9]+\\.[0-9]+").unwrap());

/// Returns true if the schema name only uses ASCII letters, digits and underscore
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Returns true if the version matches the legacy version pattern
pub fn is_valid_version(version: &str) -> bool {
    VERSION_PATTERN.is_match(version)
}

/// Decides when a request is rejected based on the two identifier checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Reject only if both name and version are invalid (historical behavior)
    #[default]
    RejectWhenBothInvalid,
    /// Reject if either name or version is invalid
    RejectWhenEitherInvalid,
}

/// Outcome of checking a name/version pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierCheck {
    pub name_valid: bool,
    pub version_valid: bool,
}

impl IdentifierCheck {
    pub fn run(name: &str, version: &str) -> Self {
        Self {
            name_valid: is_valid_name(name),
            version_valid: is_valid_version(version),
        }
    }

    /// Whether the request must be rejected under the given policy
    pub fn rejects(&self, policy: ValidationPolicy) -> bool {
        match policy {
            ValidationPolicy::RejectWhenBothInvalid => !self.name_valid && !self.version_valid,
            ValidationPolicy::RejectWhenEitherInvalid => !self.name_valid || !self.version_valid,
        }
    }
}
