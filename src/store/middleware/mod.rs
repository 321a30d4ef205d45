//! Pipeline stages that sit between `Store::dispatch` and the reducers.

mod async_dispatch;
mod credential_sync;
mod logging;

use std::sync::Arc;

use crate::state::Action;
use crate::store::container::{Store, WeakStore};

pub use async_dispatch::{AsyncDispatchMiddleware, DispatchQueue};
pub use credential_sync::CredentialSyncMiddleware;
pub use logging::LoggingMiddleware;

/// One stage of the dispatch pipeline.
///
/// A stage receives the action and the remainder of the chain. It may
/// inspect the store, forward the action with `next.run`, do work after
/// the reducers ran, or schedule follow-ups through `cx.dispatch`.
/// Not calling `next.run` swallows the action.
pub trait Middleware: Send + Sync {
    fn handle(&self, store: &Store, action: Action, cx: &ActionContext, next: Next<'_>);
}

/// The rest of the chain after the current stage.
pub struct Next<'a> {
    store: &'a Store,
    rest: &'a [Arc<dyn Middleware>],
}

impl<'a> Next<'a> {
    pub(crate) fn new(store: &'a Store, rest: &'a [Arc<dyn Middleware>]) -> Self {
        Self { store, rest }
    }

    /// Hand the action to the next stage, or to the reducers at the end.
    pub fn run(self, action: Action, cx: &ActionContext) {
        match self.rest.split_first() {
            Some((stage, rest)) => stage.handle(self.store, action, cx, Next::new(self.store, rest)),
            None => self.store.apply(&action),
        }
    }
}

/// Side channel that travels next to an action through the chain.
///
/// Carries the deferred-dispatch queue once a queue stage has run, so the
/// action itself stays plain data.
#[derive(Clone)]
pub struct ActionContext {
    store: WeakStore,
    queue: Option<DispatchQueue>,
}

impl ActionContext {
    pub(crate) fn new(store: WeakStore) -> Self {
        Self { store, queue: None }
    }

    /// Copy of this context with `queue` attached.
    pub fn with_queue(&self, queue: DispatchQueue) -> Self {
        Self {
            store: self.store.clone(),
            queue: Some(queue),
        }
    }

    pub fn queue(&self) -> Option<&DispatchQueue> {
        self.queue.as_ref()
    }

    /// Schedule a follow-up action.
    ///
    /// With a queue stage upstream the action is applied after the current
    /// one has been reduced and observed. Without one it is dispatched
    /// immediately.
    pub fn dispatch(&self, action: impl Into<Action>) {
        match &self.queue {
            Some(queue) => queue.dispatch(action),
            None => {
                if let Some(store) = self.store.upgrade() {
                    store.dispatch(action);
                }
            }
        }
    }
}
