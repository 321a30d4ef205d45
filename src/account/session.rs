use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::account::error::FlowError;
use crate::account::forms::{ChangePasswordForm, SignInForm, SignUpForm, UpdateProfileForm};
use crate::api::endpoints;
use crate::api::types::AuthenticationResponse;
use crate::bootstrap::AppContext;
use crate::state::authentication::AuthenticationAction;
use crate::state::user::{UserAction, UserPatch, UserState};

/// Account operations against the API, feeding results into the store.
///
/// Only one operation runs at a time per `Account` (and its clones); a
/// second call while one is in flight returns [`FlowError::InFlight`].
#[derive(Clone)]
pub struct Account {
    context: AppContext,
    in_flight: Arc<AtomicBool>,
}

impl Account {
    pub fn new(context: AppContext) -> Self {
        Self {
            context,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn is_authenticated(&self) -> bool {
        self.context
            .store()
            .with_state(|state| state.authentication.is_authenticated)
    }

    pub fn profile(&self) -> UserState {
        self.context.store().with_state(|state| state.user.clone())
    }

    pub async fn sign_in(&self, form: SignInForm) -> Result<UserState, FlowError> {
        let request = form.into_request()?;
        self.begin()?;
        scopeguard::defer! { self.finish(); }

        let response = self
            .context
            .api()
            .post::<_, AuthenticationResponse>(endpoints::SIGN_IN, &request)
            .await
            .map_err(|err| FlowError::from_api(err, "unauthorized", FlowError::InvalidCredentials))?;

        self.apply_authentication(response.data);
        tracing::info!("Signed in");
        Ok(self.profile())
    }

    pub async fn sign_up(&self, form: SignUpForm) -> Result<UserState, FlowError> {
        let request = form.into_request()?;
        self.begin()?;
        scopeguard::defer! { self.finish(); }

        let response = self
            .context
            .api()
            .post::<_, AuthenticationResponse>(endpoints::SIGN_UP, &request)
            .await
            .map_err(|err| FlowError::from_api(err, "unauthorized", FlowError::InvalidCredentials))?;

        self.apply_authentication(response.data);
        tracing::info!("Account created");
        Ok(self.profile())
    }

    /// End the session. Local state is cleared even if the API call fails.
    pub async fn sign_out(&self) -> Result<(), FlowError> {
        self.begin()?;
        scopeguard::defer! { self.finish(); }

        if let Err(err) = self
            .context
            .api()
            .get::<serde_json::Value>(endpoints::SIGN_OUT)
            .await
        {
            tracing::warn!(error = %err, "Sign-out request failed; clearing local session anyway");
        }

        let store = self.context.store();
        store.dispatch(AuthenticationAction::SignOut);
        store.dispatch(UserAction::SignOut);
        tracing::info!("Signed out");
        Ok(())
    }

    pub async fn update_profile(&self, form: UpdateProfileForm) -> Result<UserState, FlowError> {
        let current = self.require_session()?;
        let request = form.into_request(&current.id)?;
        self.begin()?;
        scopeguard::defer! { self.finish(); }

        self.context
            .api()
            .put::<_, serde_json::Value>(endpoints::UPDATE_USER, &request)
            .await
            .map_err(|err| FlowError::from_api(err, "unauthorized", FlowError::InvalidCredentials))?;

        self.context.store().dispatch(UserAction::UpdateUser {
            user: UserPatch {
                id: Some(request.id),
                email: Some(request.email),
                first_name: Some(request.first_name),
                last_name: Some(request.last_name),
            },
        });
        Ok(self.profile())
    }

    pub async fn change_password(&self, form: ChangePasswordForm) -> Result<(), FlowError> {
        let current = self.require_session()?;
        let request = form.into_request(&current.id)?;
        self.begin()?;
        scopeguard::defer! { self.finish(); }

        self.context
            .api()
            .put::<_, serde_json::Value>(endpoints::CHANGE_PASSWORD, &request)
            .await
            .map_err(|err| FlowError::from_api(err, "bad request", FlowError::IncorrectPassword))?;

        tracing::info!("Password changed");
        Ok(())
    }

    fn apply_authentication(&self, response: AuthenticationResponse) {
        let store = self.context.store();
        store.dispatch(AuthenticationAction::AddAuthState {
            access_token: response.access_token,
        });
        store.dispatch(UserAction::UpdateUser {
            user: response.user,
        });
    }

    fn require_session(&self) -> Result<UserState, FlowError> {
        if !self.is_authenticated() {
            return Err(FlowError::NotSignedIn);
        }
        Ok(self.profile())
    }

    fn begin(&self) -> Result<(), FlowError> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(FlowError::InFlight);
        }
        Ok(())
    }

    fn finish(&self) {
        self.in_flight.store(false, Ordering::Release);
    }
}
