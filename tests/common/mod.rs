//! Shared test utilities.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use std::path::PathBuf;
use std::sync::Arc;

use account_client::account::Account;
use account_client::api::ApiClient;
use account_client::bootstrap::{AppContext, Bootstrap};
use account_client::config::ApiConfig;
use account_client::persist::{KeyValueStorage, MemoryStorage, PersistedStateStore};
use account_client::state::AppState;
use parking_lot::Mutex;
use tempfile::TempDir;

pub use mock_backend::{CapturedRequest, MockApi, MockResponse};

/// Request client pointed at `base_url` with short timeouts.
pub fn api_client(base_url: &str) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
    })
    .expect("Failed to build API client")
}

/// Persisted store over fresh in-memory storage.
pub fn memory_persisted() -> (Arc<MemoryStorage>, PersistedStateStore) {
    let storage = Arc::new(MemoryStorage::new());
    let shared: Arc<dyn KeyValueStorage> = storage.clone();
    (storage, PersistedStateStore::new(shared, "state"))
}

/// Bootstrapped context talking to `mock`, optionally preloaded.
pub async fn boot(mock: &MockApi, preloaded: Option<AppState>) -> (AppContext, PersistedStateStore) {
    let (_, persisted) = memory_persisted();
    if let Some(state) = preloaded {
        persisted.save(&state).await;
    }
    let context = Bootstrap::new(persisted.clone(), api_client(&mock.base_url()))
        .run()
        .await;
    (context, persisted)
}

pub async fn boot_account(mock: &MockApi, preloaded: Option<AppState>) -> Account {
    let (context, _) = boot(mock, preloaded).await;
    Account::new(context)
}

/// Write a config file into a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).expect("Failed to write config");
    (dir, path)
}

/// Records every snapshot a subscriber sees, in order.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<AppState>>>);

impl Recorder {
    pub fn push(&self, state: &AppState) {
        self.0.lock().push(state.clone());
    }

    pub fn snapshots(&self) -> Vec<AppState> {
        self.0.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().len()
    }
}
