use serde::{Deserialize, Serialize};

use crate::state::mvi::SliceAction;

/// Partial profile. `None` fields leave the current value untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPatch {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserAction {
    /// Merge a (possibly partial) profile into the slice.
    UpdateUser { user: UserPatch },
    SignOut,
}

impl SliceAction for UserAction {
    fn tag(&self) -> &'static str {
        match self {
            Self::UpdateUser { .. } => "user/updateUser",
            Self::SignOut => "user/signOut",
        }
    }
}
