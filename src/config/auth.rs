//! Authentication header building for API requests.

use super::credentials::SecureString;

/// Header name and value for authentication.
pub type AuthHeader = (&'static str, String);

/// Build the bearer header for a session token.
///
/// Returns `None` for blank tokens so a cleared session sends no header.
pub fn build_auth_header(token: &SecureString) -> Option<AuthHeader> {
    let value = token.expose().trim();
    if value.is_empty() {
        return None;
    }
    Some(("Authorization", format!("Bearer {}", value)))
}
