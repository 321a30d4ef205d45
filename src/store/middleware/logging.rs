use crate::state::Action;
use crate::store::container::Store;
use crate::store::middleware::{ActionContext, Middleware, Next};

/// Logs each action tag and whether it changed the state.
pub struct LoggingMiddleware;

impl Middleware for LoggingMiddleware {
    fn handle(&self, store: &Store, action: Action, cx: &ActionContext, next: Next<'_>) {
        let tag = action.tag().to_string();
        tracing::debug!(action = %tag, "Dispatching");
        let before = store.get_state();
        next.run(action, cx);
        let changed = store.with_state(|after| *after != before);
        tracing::trace!(action = %tag, changed, "Dispatched");
    }
}
