use serde::{Deserialize, Serialize};

use crate::state::mvi::SliceAction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthenticationAction {
    /// A sign-in or sign-up succeeded. Empty tokens are ignored by the reducer.
    #[serde(rename_all = "camelCase")]
    AddAuthState { access_token: String },
    /// Session ended, locally or after a failed sign-out request.
    SignOut,
}

impl SliceAction for AuthenticationAction {
    fn tag(&self) -> &'static str {
        match self {
            Self::AddAuthState { .. } => "authentication/addAuthState",
            Self::SignOut => "authentication/signOut",
        }
    }
}
