//! Durable mirror of the application state.
//!
//! The store owns the canonical snapshot; this module only knows how to put
//! a serialized copy into a key-value backend and read it back at startup.

mod snapshot;
mod storage;

pub use snapshot::{encode, PersistedStateStore, DEFAULT_STATE_KEY};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
