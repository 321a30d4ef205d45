use serde::{Deserialize, Serialize};

use crate::state::mvi::Slice;
use crate::state::user::action::UserPatch;

/// Last-known-good profile. All fields empty means no known user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserState {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl Slice for UserState {}

impl UserState {
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
            && self.email.is_empty()
            && self.first_name.is_empty()
            && self.last_name.is_empty()
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub(super) fn merge(mut self, patch: UserPatch) -> Self {
        if let Some(id) = patch.id {
            self.id = id;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        self
    }
}

impl From<UserState> for UserPatch {
    fn from(user: UserState) -> Self {
        Self {
            id: Some(user.id),
            email: Some(user.email),
            first_name: Some(user.first_name),
            last_name: Some(user.last_name),
        }
    }
}
