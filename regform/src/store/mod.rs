//! String-keyed persistent storage for submissions and drafts.
//!
//! Values are stored as JSON text, so anything written here can be read back
//! by any other tool that understands the same keys.

mod backend;
mod memory;
mod sqlite;

pub use backend::StoreBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Store error type.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(serde_json::Error),
    #[error("deserialization error for key {key}: {source}")]
    Deserialization {
        key: String,
        source: serde_json::Error,
    },
}

/// Typed key/value store.
///
/// Wraps a `StoreBackend` with JSON serialization via serde_json.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn StoreBackend>,
}

impl Store {
    /// Create a new store with the given backend.
    pub fn new(backend: impl StoreBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Store backed by process memory.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Get a typed value for a key.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.backend.load(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw).map_err(|source| {
                StoreError::Deserialization {
                    key: key.to_string(),
                    source,
                }
            })?)),
            None => Ok(None),
        }
    }

    /// Get the stored JSON text for a key.
    pub async fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.backend.load(key).await
    }

    /// Set a typed value for a key.
    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(StoreError::Serialization)?;
        self.backend.save(key, raw).await
    }

    /// Delete a key.
    pub async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.backend.remove(key).await
    }

    /// Every key in the store, sorted.
    pub async fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.backend.keys().await
    }

    /// Keys that start with `prefix` exactly (case-sensitive, no wildcards).
    pub async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut keys = self.backend.keys().await?;
        keys.retain(|key| key.starts_with(prefix));
        Ok(keys)
    }
}
