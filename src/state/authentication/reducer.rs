use crate::state::authentication::action::AuthenticationAction;
use crate::state::authentication::state::AuthenticationState;
use crate::state::mvi::Reducer;

pub struct AuthenticationReducer;

impl Reducer for AuthenticationReducer {
    type State = AuthenticationState;
    type Action = AuthenticationAction;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State {
        match action {
            AuthenticationAction::AddAuthState { access_token } => {
                // Keeps `is_authenticated` tied to a usable token.
                if access_token.trim().is_empty() {
                    return state;
                }
                AuthenticationState {
                    is_authenticated: true,
                    access_token: Some(access_token),
                }
            }
            AuthenticationAction::SignOut => AuthenticationState::default(),
        }
    }
}
