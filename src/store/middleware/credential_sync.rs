use crate::api::ApiClient;
use crate::state::authentication::AuthenticationAction;
use crate::state::Action;
use crate::store::container::Store;
use crate::store::middleware::{ActionContext, Middleware, Next};

/// Keeps the request client's credential in step with the session.
///
/// Runs after the reducers so the token comes from the reduced slice; an
/// ignored (blank) token never reaches the client.
pub struct CredentialSyncMiddleware {
    api: ApiClient,
}

impl CredentialSyncMiddleware {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl Middleware for CredentialSyncMiddleware {
    fn handle(&self, store: &Store, action: Action, cx: &ActionContext, next: Next<'_>) {
        let auth_action = match &action {
            Action::Authentication(auth) => Some(auth.clone()),
            _ => None,
        };
        next.run(action, cx);

        match auth_action {
            Some(AuthenticationAction::AddAuthState { .. }) => {
                let token = store.with_state(|state| {
                    state.authentication.bearer_token().map(str::to_string)
                });
                if let Some(token) = token {
                    self.api.set_credential(&token);
                }
            }
            Some(AuthenticationAction::SignOut) => self.api.clear_credential(),
            None => {}
        }
    }
}
