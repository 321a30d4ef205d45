//! Client-side form checks.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// True if any value is empty after trimming.
pub fn is_any_empty(values: &[&str]) -> bool {
    values.iter().any(|value| value.trim().is_empty())
}

/// Loose `local@domain.tld` check on the trimmed input.
pub fn validate_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

/// Canonical form sent to the API: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
