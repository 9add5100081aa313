//! Credential validation rules.
//!
//! Pure predicates; callers decide how a failure is reported.

use regex::Regex;
use std::sync::LazyLock;

/// Minimum number of characters for a password to be accepted.
pub const MIN_PASSWORD_LENGTH: usize = 8;

// One `@`, no whitespace, and a dot-separated domain with non-empty labels.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("Invalid email regex pattern")
});

/// Returns `true` if `s` has the shape `local@domain.tld`.
pub fn is_valid_email(s: &str) -> bool {
    EMAIL_PATTERN.is_match(s)
}

/// Returns `true` if `s` is at least [`MIN_PASSWORD_LENGTH`] characters long.
pub fn is_strong_password(s: &str) -> bool {
    s.chars().count() >= MIN_PASSWORD_LENGTH
}

pub fn passwords_match(a: &str, b: &str) -> bool {
    a == b
}
