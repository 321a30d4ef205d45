use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::state::Action;
use crate::store::container::{Store, WeakStore};
use crate::store::middleware::{ActionContext, Middleware, Next};

/// Gives every action a deferred dispatch.
///
/// Follow-ups queued while the action is being handled are applied, in
/// order, only after the action's own update has reached subscribers.
pub struct AsyncDispatchMiddleware;

impl Middleware for AsyncDispatchMiddleware {
    fn handle(&self, store: &Store, action: Action, cx: &ActionContext, next: Next<'_>) {
        let queue = DispatchQueue::new(store.downgrade());
        next.run(action, &cx.with_queue(queue.clone()));
        queue.finish_sync_phase();
    }
}

/// Per-invocation queue of follow-up actions.
///
/// Clones share the queue. Actions pushed after the synchronous phase has
/// finished are flushed right away.
#[derive(Clone)]
pub struct DispatchQueue {
    inner: Arc<Mutex<QueueState>>,
    store: WeakStore,
}

#[derive(Default)]
struct QueueState {
    pending: VecDeque<Action>,
    sync_finished: bool,
    flushing: bool,
}

impl DispatchQueue {
    fn new(store: WeakStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(QueueState::default())),
            store,
        }
    }

    /// Queue `action` for dispatch through the top of the store.
    pub fn dispatch(&self, action: impl Into<Action>) {
        let flush_now = {
            let mut state = self.inner.lock();
            state.pending.push_back(action.into());
            state.sync_finished
        };
        if flush_now {
            self.flush();
        }
    }

    /// Number of actions waiting to be flushed.
    pub fn pending(&self) -> usize {
        self.inner.lock().pending.len()
    }

    pub fn is_sync_finished(&self) -> bool {
        self.inner.lock().sync_finished
    }

    fn finish_sync_phase(&self) {
        self.inner.lock().sync_finished = true;
        self.flush();
    }

    fn flush(&self) {
        {
            let mut state = self.inner.lock();
            // Re-entrant pushes are picked up by the loop already running.
            if state.flushing {
                return;
            }
            state.flushing = true;
        }

        loop {
            let action = {
                let mut state = self.inner.lock();
                match state.pending.pop_front() {
                    Some(action) => action,
                    None => {
                        state.flushing = false;
                        return;
                    }
                }
            };

            let Some(store) = self.store.upgrade() else {
                let mut state = self.inner.lock();
                tracing::warn!(
                    dropped = state.pending.len() + 1,
                    "Store dropped before queued actions were flushed"
                );
                state.pending.clear();
                state.flushing = false;
                return;
            };

            let tag = action.tag().to_string();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| store.dispatch(action)));
            if outcome.is_err() {
                tracing::warn!(action = %tag, "Queued action panicked during flush; continuing");
            }
        }
    }
}
