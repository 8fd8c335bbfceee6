//! Key-value storage and the board snapshot that lives in it.

mod file;
mod persistence;

use std::collections::HashMap;
use std::path::PathBuf;

#[cfg(any(test, feature = "test-mocks"))]
use mockall::automock;

pub use file::FileStore;
pub use persistence::{decode_snapshot, Persistence, Snapshot, SnapshotError, STORAGE_KEY};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read store at {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write store at {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store at {path:?} is not a JSON object of strings")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode value")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Flat string key-value store
#[cfg_attr(any(test, feature = "test-mocks"), automock)]
pub trait KeyValueStore {
    /// Read the value stored under `key`; `None` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process store, lost when dropped
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
