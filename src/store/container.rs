use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use crate::state::{Action, AppState};
use crate::store::middleware::{ActionContext, AsyncDispatchMiddleware, Middleware, Next};

type Subscriber = Arc<dyn Fn(&AppState) + Send + Sync>;

/// Observable state container.
///
/// Cheap to clone; every clone refers to the same state, middleware chain
/// and subscriber list.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: RwLock<AppState>,
    middleware: Vec<Arc<dyn Middleware>>,
    subscribers: Mutex<Vec<(u64, Subscriber)>>,
    next_subscriber_id: AtomicU64,
}

/// Non-owning handle to a [`Store`].
#[derive(Clone)]
pub struct WeakStore {
    inner: Weak<StoreInner>,
}

impl WeakStore {
    pub fn upgrade(&self) -> Option<Store> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

impl Store {
    /// Store with the default chain (deferred dispatch only).
    ///
    /// A preloaded snapshot is used verbatim; otherwise every slice starts at
    /// its default.
    pub fn new(preloaded: Option<AppState>) -> Self {
        Self::builder()
            .preloaded(preloaded)
            .middleware(AsyncDispatchMiddleware)
            .build()
    }

    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    /// Send an action through the middleware chain to the reducers.
    ///
    /// Never fails: actions no slice recognizes leave the state unchanged
    /// but still notify subscribers.
    pub fn dispatch(&self, action: impl Into<Action>) {
        let action = action.into();
        let cx = ActionContext::new(self.downgrade());
        Next::new(self, &self.inner.middleware).run(action, &cx);
    }

    /// Current snapshot.
    pub fn get_state(&self) -> AppState {
        self.inner.state.read().clone()
    }

    /// Read the current snapshot without cloning it.
    pub fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&*self.inner.state.read())
    }

    /// Register a callback run synchronously after every applied action.
    ///
    /// The subscription lasts until [`Unsubscribe::unsubscribe`] is called;
    /// dropping the handle keeps it registered.
    pub fn subscribe<F>(&self, callback: F) -> Unsubscribe
    where
        F: Fn(&AppState) + Send + Sync + 'static,
    {
        let id = self.inner.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .subscribers
            .lock()
            .push((id, Arc::new(callback)));
        Unsubscribe {
            store: self.downgrade(),
            id,
        }
    }

    pub fn downgrade(&self) -> WeakStore {
        WeakStore {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Bottom of the chain: reduce, then notify.
    ///
    /// No lock is held while subscribers run, so they may read or dispatch.
    pub(crate) fn apply(&self, action: &Action) {
        let snapshot = {
            let mut state = self.inner.state.write();
            let next = state.clone().reduce(action);
            *state = next;
            state.clone()
        };

        let subscribers: Vec<Subscriber> = self
            .inner
            .subscribers
            .lock()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in subscribers {
            callback(&snapshot);
        }
    }
}

/// Builds a [`Store`] with an explicit, ordered middleware chain.
#[derive(Default)]
pub struct StoreBuilder {
    preloaded: Option<AppState>,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl StoreBuilder {
    pub fn preloaded(mut self, state: Option<AppState>) -> Self {
        self.preloaded = state;
        self
    }

    /// Append a stage. Stages run in the order they are added.
    pub fn middleware(mut self, stage: impl Middleware + 'static) -> Self {
        self.middleware.push(Arc::new(stage));
        self
    }

    /// Append a stage that is already shared.
    pub fn shared_middleware(mut self, stage: Arc<dyn Middleware>) -> Self {
        self.middleware.push(stage);
        self
    }

    pub fn build(self) -> Store {
        Store {
            inner: Arc::new(StoreInner {
                state: RwLock::new(self.preloaded.unwrap_or_default()),
                middleware: self.middleware,
                subscribers: Mutex::new(Vec::new()),
                next_subscriber_id: AtomicU64::new(0),
            }),
        }
    }
}

/// Handle returned by [`Store::subscribe`].
pub struct Unsubscribe {
    store: WeakStore,
    id: u64,
}

impl Unsubscribe {
    pub fn unsubscribe(self) {
        if let Some(store) = self.store.upgrade() {
            store
                .inner
                .subscribers
                .lock()
                .retain(|(id, _)| *id != self.id);
        }
    }
}
