//! Storage seam under [`Store`](super::Store).

use async_trait::async_trait;

use super::StoreError;

/// Where JSON text lives between runs.
///
/// Only whole values are read and written; key filtering happens in `Store`,
/// so every backend lists keys the same way.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Insert or overwrite.
    async fn save(&self, key: &str, json: String) -> Result<(), StoreError>;

    /// Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Every stored key, sorted.
    async fn keys(&self) -> Result<Vec<String>, StoreError>;
}
