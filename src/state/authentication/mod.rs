mod action;
mod reducer;
mod state;

pub use action::AuthenticationAction;
pub use reducer::AuthenticationReducer;
pub use state::AuthenticationState;
