use thiserror::Error;

use crate::api::ApiError;

/// Why an account operation did not complete.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Form input rejected before any request was made
    #[error("{0}")]
    Validation(String),

    #[error("Your credentials are invalid")]
    InvalidCredentials,

    #[error("Your password is incorrect")]
    IncorrectPassword,

    #[error("You need to sign in first")]
    NotSignedIn,

    /// Another operation on the same account is still running
    #[error("Another request is already in progress")]
    InFlight,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl FlowError {
    /// Map an API error whose first message is `message` to `mapped`;
    /// anything else stays an `Api` error.
    pub(crate) fn from_api(err: ApiError, message: &str, mapped: FlowError) -> Self {
        if err.message_is(message) {
            mapped
        } else {
            FlowError::Api(err)
        }
    }
}
