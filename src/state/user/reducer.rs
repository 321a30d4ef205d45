use crate::state::mvi::Reducer;
use crate::state::user::action::UserAction;
use crate::state::user::state::UserState;

pub struct UserReducer;

impl Reducer for UserReducer {
    type State = UserState;
    type Action = UserAction;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State {
        match action {
            UserAction::UpdateUser { user } => state.merge(user),
            UserAction::SignOut => UserState::default(),
        }
    }
}
