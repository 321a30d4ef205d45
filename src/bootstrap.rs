//! Startup sequencing.
//!
//! Brings the application from `Loading` to `Ready` exactly once:
//!
//! 1. load the persisted snapshot (absence is fine)
//! 2. install its access token on the request client
//! 3. build the store, preloaded with the snapshot
//! 4. subscribe the persister that writes every new snapshot back
//! 5. publish the ready context
//!
//! There is no timeout: if storage never answers, the phase stays `Loading`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{watch, Mutex};
use tokio_util::task::TaskTracker;

use crate::api::ApiClient;
use crate::persist::{self, PersistedStateStore};
use crate::store::{
    AsyncDispatchMiddleware, CredentialSyncMiddleware, LoggingMiddleware, Middleware, Store,
};

/// Where startup currently is.
#[derive(Clone)]
pub enum BootPhase {
    Loading,
    Ready(AppContext),
}

impl BootPhase {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Everything the rest of the application needs once startup is done.
///
/// Passed around explicitly; there is no global store.
#[derive(Clone)]
pub struct AppContext {
    store: Store,
    api: ApiClient,
    pending_saves: TaskTracker,
}

impl AppContext {
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Wait until every snapshot write issued so far has finished.
    ///
    /// Writes issued while waiting are waited for too.
    pub async fn flush_pending_saves(&self) {
        self.pending_saves.close();
        self.pending_saves.wait().await;
        self.pending_saves.reopen();
    }
}

pub struct Bootstrap {
    persisted: PersistedStateStore,
    api: ApiClient,
    extra_middleware: Vec<Arc<dyn Middleware>>,
    phase: watch::Sender<BootPhase>,
}

impl Bootstrap {
    pub fn new(persisted: PersistedStateStore, api: ApiClient) -> Self {
        let (phase, _) = watch::channel(BootPhase::Loading);
        Self {
            persisted,
            api,
            extra_middleware: Vec::new(),
            phase,
        }
    }

    /// Append a stage after the built-in ones (logging, deferred dispatch,
    /// credential sync).
    pub fn with_middleware(mut self, stage: impl Middleware + 'static) -> Self {
        self.extra_middleware.push(Arc::new(stage));
        self
    }

    /// Observe the phase; `Ready` is published once.
    pub fn phase(&self) -> watch::Receiver<BootPhase> {
        self.phase.subscribe()
    }

    /// Run the startup sequence. Later calls return the same context.
    ///
    /// Snapshot writes are spawned on the runtime that polls this future.
    /// Outside a tokio runtime the store still comes up, but nothing is
    /// persisted.
    pub async fn run(&mut self) -> AppContext {
        let ready = match &*self.phase.borrow() {
            BootPhase::Ready(context) => Some(context.clone()),
            BootPhase::Loading => None,
        };
        if let Some(context) = ready {
            return context;
        }

        tracing::debug!(key = %self.persisted.key(), "Loading persisted state");
        let preloaded = self.persisted.load().await;

        if let Some(token) = preloaded
            .as_ref()
            .and_then(|state| state.authentication.bearer_token())
        {
            self.api.set_credential(token);
        }

        let mut builder = Store::builder()
            .preloaded(preloaded)
            .middleware(LoggingMiddleware)
            .middleware(AsyncDispatchMiddleware)
            .middleware(CredentialSyncMiddleware::new(self.api.clone()));
        for stage in self.extra_middleware.drain(..) {
            builder = builder.shared_middleware(stage);
        }
        let store = builder.build();

        let pending_saves = TaskTracker::new();
        self.subscribe_persister(&store, pending_saves.clone());

        let context = AppContext {
            store,
            api: self.api.clone(),
            pending_saves,
        };
        self.phase.send_replace(BootPhase::Ready(context.clone()));
        tracing::debug!("Bootstrap complete");
        context
    }

    fn subscribe_persister(&self, store: &Store, pending_saves: TaskTracker) {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::warn!(error = %err, "No tokio runtime; state changes will not be persisted");
                return;
            }
        };
        let writer = SnapshotWriter::new(self.persisted.clone());
        // Lives as long as the store.
        let _subscription = store.subscribe(move |state| {
            let bytes = match persist::encode(state) {
                Ok(bytes) => bytes,
                Err(err) => {
                    tracing::warn!(error = %err, "Failed to encode state snapshot");
                    return;
                }
            };
            let seq = writer.issue();
            let writer = writer.clone();
            pending_saves.spawn_on(async move { writer.write(seq, bytes).await }, &runtime);
        });
    }
}

/// Background snapshot writes where the most recently issued snapshot wins.
///
/// Each write carries the sequence number it was issued with. Writes are
/// serialized, and one that finds a newer snapshot already on disk is
/// skipped.
#[derive(Clone)]
struct SnapshotWriter {
    persisted: PersistedStateStore,
    issued: Arc<AtomicU64>,
    written: Arc<Mutex<u64>>,
}

impl SnapshotWriter {
    fn new(persisted: PersistedStateStore) -> Self {
        Self {
            persisted,
            issued: Arc::new(AtomicU64::new(0)),
            written: Arc::new(Mutex::new(0)),
        }
    }

    fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::Relaxed) + 1
    }

    async fn write(&self, seq: u64, bytes: Vec<u8>) {
        let mut written = self.written.lock().await;
        if *written > seq {
            tracing::trace!(seq, latest = *written, "Skipping stale snapshot");
            return;
        }
        self.persisted.save_encoded(bytes).await;
        *written = seq;
    }
}
