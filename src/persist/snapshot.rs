use std::sync::Arc;

use crate::persist::storage::{KeyValueStorage, StorageError};
use crate::state::AppState;

/// Key the snapshot lives under unless configured otherwise.
pub const DEFAULT_STATE_KEY: &str = "state";

/// Reads and writes the serialized `AppState` under one fixed key.
///
/// Failures never reach callers: a failed load looks like a first run and a
/// failed save is logged and dropped.
#[derive(Clone)]
pub struct PersistedStateStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl PersistedStateStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Last saved snapshot, or `None` if there is none or it can't be read.
    pub async fn load(&self) -> Option<AppState> {
        match self.try_load().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "Ignoring unreadable persisted state");
                None
            }
        }
    }

    pub async fn try_load(&self) -> Result<Option<AppState>, StorageError> {
        let Some(bytes) = self.storage.get(&self.key).await? else {
            return Ok(None);
        };
        Ok(Some(decode(&bytes)?))
    }

    /// Overwrite the stored snapshot. Last writer wins.
    pub async fn save(&self, snapshot: &AppState) {
        match encode(snapshot) {
            Ok(bytes) => self.save_encoded(bytes).await,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "Failed to encode state snapshot");
            }
        }
    }

    /// Write an already-encoded snapshot (see [`encode`]).
    pub async fn save_encoded(&self, bytes: Vec<u8>) {
        if let Err(err) = self.storage.set(&self.key, bytes).await {
            tracing::warn!(key = %self.key, error = %err, "Failed to persist state snapshot");
        }
    }
}

/// Serialize a snapshot into the persisted format (JSON).
pub fn encode(snapshot: &AppState) -> Result<Vec<u8>, StorageError> {
    Ok(serde_json::to_vec(snapshot)?)
}

fn decode(bytes: &[u8]) -> Result<AppState, StorageError> {
    Ok(serde_json::from_slice(bytes)?)
}
