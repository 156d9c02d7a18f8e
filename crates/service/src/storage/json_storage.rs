use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::StorageError;
use crate::storage::DocumentStore;

/// Typed access to named collections stored as JSON arrays.
///
/// Schema-agnostic: any `T` that round-trips through serde can be stored.
#[derive(Clone)]
pub struct JsonStorage {
    backend: Arc<dyn DocumentStore>,
}

impl JsonStorage {
    pub fn new(backend: Arc<dyn DocumentStore>) -> Self {
        Self { backend }
    }

    /// Load the collection `name`; `Ok(None)` when the document does not exist.
    pub async fn get<T: DeserializeOwned>(&self, name: &str) -> Result<Option<Vec<T>>, StorageError> {
        let Some(bytes) = self.backend.read(name).await? else {
            return Ok(None);
        };
        let items = serde_json::from_slice(&bytes)
            .map_err(|source| StorageError::Parse { name: name.to_string(), source })?;
        Ok(Some(items))
    }

    /// Serialize `items` and fully overwrite the collection `name`.
    pub async fn save<T: Serialize>(&self, items: &[T], name: &str) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(items)
            .map_err(|source| StorageError::Serialize { name: name.to_string(), source })?;
        self.backend.write(name, bytes).await
    }
}
