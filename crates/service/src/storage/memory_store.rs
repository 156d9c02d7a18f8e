use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::StorageError;
use crate::storage::DocumentStore;

/// In-process document store; contents are lost when the process exits.
#[derive(Default, Debug)]
pub struct MemoryDocumentStore {
    docs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place raw bytes under `name`, bypassing serialization.
    pub async fn put_raw(&self, name: &str, bytes: impl Into<Vec<u8>>) {
        self.docs.write().await.insert(name.to_string(), bytes.into());
    }

    #[cfg(test)]
    pub(crate) async fn contains(&self, name: &str) -> bool {
        self.docs.read().await.contains_key(name)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn read(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.docs.read().await.get(name).cloned())
    }

    async fn write(&self, name: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        self.docs.write().await.insert(name.to_string(), bytes);
        Ok(())
    }
}
