mod action;
mod reducer;
mod state;

pub use action::{UserAction, UserPatch};
pub use reducer::UserReducer;
pub use state::UserState;
