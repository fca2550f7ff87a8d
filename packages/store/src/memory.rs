use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::document::{Document, Fields};
use crate::error::StoreError;
use crate::repo::DocumentStore;

/// One call made against a [`MemoryStore`], recorded in call order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    List { collection: String },
    Create { collection: String },
    Delete { collection: String, id: String },
}

/// In-memory DocumentStore for testing and the offline fallback backend.
///
/// Collections keep documents in insertion order, which is the order
/// [`DocumentStore::list_documents`] returns them in.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    collections: Arc<Mutex<HashMap<String, Vec<Document>>>>,
    journal: Arc<Mutex<Vec<Operation>>>,
    next_key: Arc<AtomicU64>,
    offline: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a document in place without going through the journal.
    pub fn insert(&self, collection: &str, doc: Document) {
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection.to_string()).or_default();
        docs.retain(|d| d.id != doc.id);
        docs.push(doc);
    }

    /// Snapshot of a collection.
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Calls made so far, oldest first.
    pub fn journal(&self) -> Vec<Operation> {
        self.journal.lock().unwrap().clone()
    }

    /// When offline, every call fails with [`StoreError::Unavailable`] and nothing changes.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn record(&self, op: Operation) -> Result<(), StoreError> {
        self.journal.lock().unwrap().push(op);
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }
        Ok(())
    }

    fn generate_key(&self) -> String {
        let n = self.next_key.fetch_add(1, Ordering::SeqCst) + 1;
        format!("mem-{n:08}")
    }
}

impl DocumentStore for MemoryStore {
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.record(Operation::List {
            collection: collection.to_string(),
        })?;
        Ok(self.documents(collection))
    }

    async fn create_document(
        &self,
        collection: &str,
        fields: Fields,
    ) -> Result<Document, StoreError> {
        self.record(Operation::Create {
            collection: collection.to_string(),
        })?;
        let doc = Document::new(self.generate_key(), fields);
        self.insert(collection, doc.clone());
        Ok(doc)
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.record(Operation::Delete {
            collection: collection.to_string(),
            id: id.to_string(),
        })?;
        if let Some(docs) = self.collections.lock().unwrap().get_mut(collection) {
            docs.retain(|d| d.id != id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FieldValue;

    #[tokio::test]
    async fn test_create_list_delete() {
        let store = MemoryStore::new();

        assert!(store.list_documents("users").await.unwrap().is_empty());

        let first = store
            .create_document("users", Fields::from([("n".to_string(), FieldValue::Integer(1))]))
            .await
            .unwrap();
        let second = store
            .create_document("users", Fields::from([("n".to_string(), FieldValue::Integer(2))]))
            .await
            .unwrap();
        assert_ne!(first.id, second.id);

        let docs = store.list_documents("users").await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, first.id);
        assert_eq!(docs[1].id, second.id);

        store.delete_document("users", &first.id).await.unwrap();
        let docs = store.list_documents("users").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, second.id);
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let store = MemoryStore::new();
        store.delete_document("users", "nope").await.unwrap();
        store.delete_document("empty", "nope").await.unwrap();
        assert_eq!(store.journal().len(), 2);
    }

    #[tokio::test]
    async fn test_collections_are_separate() {
        let store = MemoryStore::new();
        store.create_document("pie", Fields::new()).await.unwrap();
        assert!(store.list_documents("users").await.unwrap().is_empty());
        assert_eq!(store.list_documents("pie").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_offline_changes_nothing() {
        let store = MemoryStore::new();
        store.insert("users", Document::new("k", Fields::new()));
        store.set_offline(true);

        assert!(store.delete_document("users", "k").await.is_err());
        assert!(store.create_document("users", Fields::new()).await.is_err());
        assert_eq!(store.documents("users").len(), 1);

        store.set_offline(false);
        assert_eq!(store.list_documents("users").await.unwrap().len(), 1);
    }

    #[test]
    fn test_insert_replaces_same_key() {
        let store = MemoryStore::new();
        store.insert("users", Document::new("k", Fields::new()));
        store.insert(
            "users",
            Document::new("k", Fields::from([("x".to_string(), FieldValue::Null)])),
        );
        let docs = store.documents("users");
        assert_eq!(docs.len(), 1);
        assert!(docs[0].field("x").is_some());
    }
}
