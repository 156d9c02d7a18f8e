use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::contacts::domain::{default_contacts, Contact, CONTACTS_COLLECTION};
use crate::errors::StorageError;
use crate::storage::JsonStorage;

/// List/get/create/delete over one contacts collection.
///
/// Every mutation is a full read-modify-write of the collection document with
/// no lock held across it, so concurrent creates or deletes can overwrite each
/// other. Only seeding is serialized.
pub struct ContactService {
    storage: JsonStorage,
    collection: String,
    seed_guard: Mutex<()>,
}

impl ContactService {
    pub fn new(storage: JsonStorage) -> Self {
        Self::with_collection(storage, CONTACTS_COLLECTION)
    }

    pub fn with_collection(storage: JsonStorage, collection: impl Into<String>) -> Self {
        Self { storage, collection: collection.into(), seed_guard: Mutex::new(()) }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Persist the default contacts if the collection does not exist yet.
    /// Returns `true` when this call wrote them.
    pub async fn ensure_seeded(&self) -> Result<bool, StorageError> {
        let (_, seeded) = self.seed_if_absent().await?;
        Ok(seeded)
    }

    async fn seed_if_absent(&self) -> Result<(Vec<Contact>, bool), StorageError> {
        let _guard = self.seed_guard.lock().await;
        if let Some(existing) = self.storage.get::<Contact>(&self.collection).await? {
            return Ok((existing, false));
        }
        let defaults = default_contacts();
        self.storage.save(&defaults, &self.collection).await?;
        info!(collection = %self.collection, count = defaults.len(), "seeded default contacts");
        Ok((defaults, true))
    }

    /// Current collection, seeding it first when absent.
    async fn load(&self) -> Result<Vec<Contact>, StorageError> {
        match self.storage.get::<Contact>(&self.collection).await? {
            Some(contacts) => Ok(contacts),
            None => Ok(self.seed_if_absent().await?.0),
        }
    }

    pub async fn list(&self) -> Result<Vec<Contact>, StorageError> {
        let contacts = self.load().await?;
        debug!(collection = %self.collection, count = contacts.len(), "list contacts");
        Ok(contacts)
    }

    /// First contact with `id`, if any.
    pub async fn get(&self, id: i32) -> Result<Option<Contact>, StorageError> {
        let contacts = self.load().await?;
        let found = contacts.into_iter().find(|c| c.id == id);
        debug!(collection = %self.collection, id, found = found.is_some(), "get contact");
        Ok(found)
    }

    /// Append `contact` as given; an existing contact with the same id is kept.
    pub async fn create(&self, contact: Contact) -> Result<Contact, StorageError> {
        let mut contacts = self.load().await?;
        contacts.push(contact.clone());
        self.storage.save(&contacts, &self.collection).await?;
        info!(collection = %self.collection, id = contact.id, count = contacts.len(), "created contact");
        Ok(contact)
    }

    /// Remove every contact with `id`. Returns `false` without writing when none match.
    pub async fn delete(&self, id: i32) -> Result<bool, StorageError> {
        let mut contacts = self.load().await?;
        if !contacts.iter().any(|c| c.id == id) {
            debug!(collection = %self.collection, id, "delete of unknown contact");
            return Ok(false);
        }
        let before = contacts.len();
        contacts.retain(|c| c.id != id);
        self.storage.save(&contacts, &self.collection).await?;
        info!(collection = %self.collection, id, removed = before - contacts.len(), "deleted contact");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::{DocumentStore, FileDocumentStore, MemoryDocumentStore};

    fn memory_service() -> (Arc<MemoryDocumentStore>, ContactService) {
        let backend = Arc::new(MemoryDocumentStore::new());
        let svc = ContactService::new(JsonStorage::new(backend.clone()));
        (backend, svc)
    }

    async fn stored(backend: &Arc<MemoryDocumentStore>) -> Result<Vec<Contact>, anyhow::Error> {
        let storage = JsonStorage::new(backend.clone());
        Ok(storage.get(CONTACTS_COLLECTION).await?.unwrap_or_default())
    }

    #[tokio::test]
    async fn first_list_after_cold_start_returns_seeded_contacts() -> Result<(), anyhow::Error> {
        let (backend, svc) = memory_service();
        assert!(!backend.contains(CONTACTS_COLLECTION).await);

        let listed = svc.list().await?;
        assert_eq!(listed, default_contacts());
        assert_eq!(stored(&backend).await?, default_contacts());
        Ok(())
    }

    #[tokio::test]
    async fn first_get_after_cold_start_sees_seeded_contact() -> Result<(), anyhow::Error> {
        let (_, svc) = memory_service();
        assert_eq!(svc.get(2).await?, Some(Contact::new(2, "lacy@contoso.com", "Lacy Barrera")));
        Ok(())
    }

    #[tokio::test]
    async fn ensure_seeded_writes_only_once() -> Result<(), anyhow::Error> {
        let (backend, svc) = memory_service();
        assert!(svc.ensure_seeded().await?);
        assert!(!svc.ensure_seeded().await?);

        svc.create(Contact::new(9, "n@x.com", "Nine")).await?;
        assert!(!svc.ensure_seeded().await?);
        assert_eq!(stored(&backend).await?.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn existing_empty_collection_is_not_reseeded() -> Result<(), anyhow::Error> {
        let (backend, svc) = memory_service();
        backend.put_raw(CONTACTS_COLLECTION, "[]").await;
        assert!(svc.list().await?.is_empty());
        assert!(!svc.ensure_seeded().await?);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_cold_start_seeds_once() -> Result<(), anyhow::Error> {
        let (backend, svc) = memory_service();
        let svc = Arc::new(svc);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let svc = svc.clone();
                tokio::spawn(async move { svc.ensure_seeded().await })
            })
            .collect();
        let mut writes = 0;
        for h in handles {
            if h.await?? {
                writes += 1;
            }
        }
        assert_eq!(writes, 1);
        assert_eq!(stored(&backend).await?, default_contacts());
        Ok(())
    }

    #[tokio::test]
    async fn get_returns_first_match_or_none() -> Result<(), anyhow::Error> {
        let (_, svc) = memory_service();
        svc.create(Contact::new(1, "dup@x.com", "Duplicate One")).await?;

        let first = svc.get(1).await?;
        assert_eq!(first.map(|c| c.name), Some("Barney Poland".to_string()));
        assert_eq!(svc.get(42).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn create_keeps_duplicate_ids() -> Result<(), anyhow::Error> {
        let (backend, svc) = memory_service();
        let created = svc.create(Contact::new(3, "other@x.com", "Other")).await?;
        assert_eq!(created.id, 3);

        let all = stored(&backend).await?;
        assert_eq!(all.len(), 4);
        assert_eq!(all.iter().filter(|c| c.id == 3).count(), 2);
        assert_eq!(all.last(), Some(&created));
        Ok(())
    }

    #[tokio::test]
    async fn delete_unknown_id_leaves_collection_untouched() -> Result<(), anyhow::Error> {
        let (backend, svc) = memory_service();
        svc.ensure_seeded().await?;
        backend.put_raw(CONTACTS_COLLECTION, r#"[ {"id":1,"emailAddress":"a","name":"A"} ]"#).await;

        assert!(!svc.delete(99).await?);
        // no write happened, so the original formatting is intact
        let raw = backend.read(CONTACTS_COLLECTION).await?.unwrap_or_default();
        assert_eq!(raw, br#"[ {"id":1,"emailAddress":"a","name":"A"} ]"#.to_vec());
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_every_match() -> Result<(), anyhow::Error> {
        let (backend, svc) = memory_service();
        svc.create(Contact::new(2, "again@x.com", "Again")).await?;
        svc.create(Contact::new(2, "third@x.com", "Third")).await?;

        assert!(svc.delete(2).await?);
        let ids: Vec<i32> = stored(&backend).await?.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(!svc.delete(2).await?);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_document_propagates_parse_error() {
        let (backend, svc) = memory_service();
        backend.put_raw(CONTACTS_COLLECTION, "not json").await;
        assert!(matches!(svc.list().await, Err(StorageError::Parse { .. })));
        assert!(matches!(svc.delete(1).await, Err(StorageError::Parse { .. })));
    }

    #[tokio::test]
    async fn custom_collection_uses_its_own_file() -> Result<(), anyhow::Error> {
        let root = std::env::temp_dir().join(format!("contact_service_{}", uuid::Uuid::new_v4()));
        let files = FileDocumentStore::new(&root).await?;
        let svc = ContactService::with_collection(JsonStorage::new(Arc::new(files.clone())), "people");
        assert_eq!(svc.collection(), "people");

        svc.ensure_seeded().await?;
        assert!(files.path_for("people").exists());
        assert!(!files.path_for(CONTACTS_COLLECTION).exists());

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
