use async_trait::async_trait;

use crate::errors::StorageError;

/// Raw document persistence keyed by collection name.
/// Implementations can be file-backed, in-memory, or remote KV.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the whole document; `Ok(None)` when it does not exist.
    async fn read(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError>;
    /// Replace the whole document with `bytes`.
    async fn write(&self, name: &str, bytes: Vec<u8>) -> Result<(), StorageError>;
}
