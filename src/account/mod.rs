//! Account operations: each one validates a form, makes one API call and
//! feeds the result into the store.

mod error;
mod forms;
mod session;
pub mod validation;

pub use error::FlowError;
pub use forms::{ChangePasswordForm, SignInForm, SignUpForm, UpdateProfileForm};
pub use session::Account;
