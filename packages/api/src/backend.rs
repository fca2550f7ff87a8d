//! Backend selection: the hosted project when one is configured, memory otherwise.

use store::{Document, DocumentStore, Fields, MemoryStore, StoreError};

use crate::config::BackendConfig;
use crate::firestore::FirestoreClient;

#[derive(Clone, Debug)]
pub enum Backend {
    Firestore(FirestoreClient),
    Memory(MemoryStore),
}

impl Backend {
    /// Build the backend described by `config`.
    pub fn connect(config: &BackendConfig) -> Result<Self, StoreError> {
        if !config.uses_remote() {
            tracing::info!("no Firestore project configured, using in-memory backend");
            return Ok(Self::Memory(MemoryStore::new()));
        }
        tracing::info!(project = %config.firebase.project_id, "using Firestore backend");
        Ok(Self::Firestore(FirestoreClient::new(config.firebase.clone())?))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Firestore(_))
    }
}

impl DocumentStore for Backend {
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        match self {
            Self::Firestore(client) => client.list_documents(collection).await,
            Self::Memory(store) => store.list_documents(collection).await,
        }
    }

    async fn create_document(
        &self,
        collection: &str,
        fields: Fields,
    ) -> Result<Document, StoreError> {
        match self {
            Self::Firestore(client) => client.create_document(collection, fields).await,
            Self::Memory(store) => store.create_document(collection, fields).await,
        }
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        match self {
            Self::Firestore(client) => client.delete_document(collection, id).await,
            Self::Memory(store) => store.delete_document(collection, id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{UserDirectory, UserDraft};

    #[test]
    fn test_connect_without_project_is_memory() {
        let backend = Backend::connect(&BackendConfig::default()).unwrap();
        assert!(!backend.is_remote());
    }

    #[test]
    fn test_connect_with_project_is_remote() {
        let mut config = BackendConfig::default();
        config.firebase.project_id = "demo-project".into();
        assert!(Backend::connect(&config).unwrap().is_remote());
    }

    #[tokio::test]
    async fn test_memory_backend_round_trip() {
        let config = BackendConfig::default();
        let directory = UserDirectory::new(
            Backend::connect(&config).unwrap(),
            config.collections.clone(),
        );

        let write = directory
            .submit(&UserDraft::new("a", "a@x.com", "40"))
            .unwrap();
        write.await.unwrap();

        // Written to "pie", listed from "users".
        assert!(directory.fetch_users().await.unwrap().is_empty());
        let Backend::Memory(store) = directory.store() else {
            panic!("expected memory backend");
        };
        assert_eq!(store.documents("pie").len(), 1);
    }
}
