use serde::{Deserialize, Serialize};

use crate::state::mvi::Slice;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthenticationState {
    pub is_authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl Slice for AuthenticationState {}

impl AuthenticationState {
    /// Token to install on the request client, if the session carries one.
    pub fn bearer_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }
}
