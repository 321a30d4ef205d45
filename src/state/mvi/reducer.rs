//! Reducer trait for MVI architecture.

use super::action::SliceAction;
use super::slice::Slice;

/// Reducer transforms a slice based on actions.
///
/// The reducer is the only place where slice transitions happen.
/// It must be a pure, total function: (Slice, Action) -> Slice
pub trait Reducer {
    /// The slice type this reducer operates on.
    type State: Slice;

    /// The action type this reducer handles.
    type Action: SliceAction;

    /// Process an action and return the new slice value.
    fn reduce(state: Self::State, action: Self::Action) -> Self::State;
}
