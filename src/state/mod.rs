//! Application state: the slices, the root snapshot, and the actions that
//! move it forward.

pub mod authentication;
pub mod mvi;
pub mod user;

use serde::{Deserialize, Serialize};

use self::authentication::{AuthenticationAction, AuthenticationReducer, AuthenticationState};
use self::mvi::{Reducer, SliceAction};
use self::user::{UserAction, UserReducer, UserState};

/// Full value of all slices at one instant. This is what gets persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub authentication: AuthenticationState,
    pub user: UserState,
}

impl AppState {
    /// Route an action to the slice that recognizes it.
    ///
    /// Actions no slice recognizes return the state unchanged.
    pub fn reduce(self, action: &Action) -> Self {
        match action {
            Action::Authentication(action) => Self {
                authentication: AuthenticationReducer::reduce(
                    self.authentication,
                    action.clone(),
                ),
                ..self
            },
            Action::User(action) => Self {
                user: UserReducer::reduce(self.user, action.clone()),
                ..self
            },
            Action::Custom { .. } => self,
        }
    }
}

/// Every state-changing request that flows through the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Authentication(AuthenticationAction),
    User(UserAction),
    /// Application-level event with no slice reducer. Middleware may react to
    /// it; the state is left untouched.
    Custom {
        tag: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payload: Option<serde_json::Value>,
    },
}

impl Action {
    pub fn custom(tag: impl Into<String>) -> Self {
        Self::Custom {
            tag: tag.into(),
            payload: None,
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::Authentication(action) => action.tag(),
            Self::User(action) => action.tag(),
            Self::Custom { tag, .. } => tag,
        }
    }
}

impl From<AuthenticationAction> for Action {
    fn from(action: AuthenticationAction) -> Self {
        Self::Authentication(action)
    }
}

impl From<UserAction> for Action {
    fn from(action: UserAction) -> Self {
        Self::User(action)
    }
}
