use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::errors::StorageError;
use crate::storage::DocumentStore;

/// Stores each document as `<root>/<name>.json`.
///
/// Writes go straight to the target file, so a crash mid-write can leave a
/// truncated document behind.
#[derive(Clone, Debug)]
pub struct FileDocumentStore {
    root: PathBuf,
}

impl FileDocumentStore {
    /// Create the store, making sure the root directory exists.
    pub async fn new<P: Into<PathBuf>>(root: P) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(|source| StorageError::Write {
            name: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    /// Path of the file backing the document `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn read(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(name);
        match fs::read(&path).await {
            Ok(bytes) => {
                debug!(path = %path.display(), len = bytes.len(), "document read");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { name: name.to_string(), source }),
        }
    }

    async fn write(&self, name: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let path = self.path_for(name);
        let to_err = |source| StorageError::Write { name: name.to_string(), source };
        fs::create_dir_all(&self.root).await.map_err(to_err)?;
        fs::write(&path, &bytes).await.map_err(to_err)?;
        debug!(path = %path.display(), len = bytes.len(), "document written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("file_document_store_{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn missing_document_is_absent() -> Result<(), anyhow::Error> {
        let root = temp_root();
        let store = FileDocumentStore::new(&root).await?;
        assert!(store.read("contacts").await?.is_none());
        let _ = fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn write_overwrites_named_json_file() -> Result<(), anyhow::Error> {
        let root = temp_root();
        let store = FileDocumentStore::new(&root).await?;

        store.write("contacts", b"[1,2,3]".to_vec()).await?;
        store.write("contacts", b"[]".to_vec()).await?;

        let on_disk = fs::read(root.join("contacts.json")).await?;
        assert_eq!(on_disk, b"[]");
        assert_eq!(store.read("contacts").await?, Some(b"[]".to_vec()));

        let _ = fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn write_recreates_removed_root() -> Result<(), anyhow::Error> {
        let root = temp_root();
        let store = FileDocumentStore::new(&root).await?;
        fs::remove_dir_all(&root).await?;

        store.write("contacts", b"[]".to_vec()).await?;
        assert!(store.path_for("contacts").exists());

        let _ = fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn unreadable_document_is_a_read_error() -> Result<(), anyhow::Error> {
        let root = temp_root();
        let store = FileDocumentStore::new(&root).await?;
        // a directory where the file should be cannot be read as a document
        fs::create_dir_all(store.path_for("contacts")).await?;

        let err = store.read("contacts").await.unwrap_err();
        assert!(matches!(err, StorageError::Read { .. }));
        assert_eq!(err.document(), "contacts");

        let _ = fs::remove_dir_all(&root).await;
        Ok(())
    }
}
