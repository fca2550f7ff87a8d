//! # Users directory: user operations over an abstract document store
//!
//! [`UserDirectory`] is the only thing the UI talks to. It knows the user record shape
//! (via [`crate::models`]) and the collection names (via [`Collections`]); everything
//! about reaching the backend goes through the [`DocumentStore`] trait, so the same
//! code runs against the hosted database, the in-memory store used in tests, or any
//! future backend.
//!
//! ## [`DocumentStore`] trait
//!
//! Three async methods: list a whole collection, create a document with a
//! backend-generated key, delete a document by key. Deleting a key that does not exist
//! is not an error. Implementations live in [`crate::memory`] and in the `api` crate.
//!
//! ## Operations
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`fetch_users`](UserDirectory::fetch_users) | Lists `collections.list` and maps every well-formed document to a [`User`]. |
//! | [`remove_user`](UserDirectory::remove_user) | Deletes `collections.list/{id}`. |
//! | [`add_user`](UserDirectory::add_user) | Inserts into `collections.add`, returning the new key. |
//! | [`submit`](UserDirectory::submit) | Validates an add-form draft; only a valid draft yields the write. |
//!
//! There is no update: records are created or deleted, never edited.

use std::future::Future;

use crate::config::Collections;
use crate::document::{Document, Fields};
use crate::error::{DraftError, StoreError};
use crate::form::UserDraft;
use crate::models::{user_document_fields, users_from_documents, NewUser, User};

/// Async access to a schemaless document database.
pub trait DocumentStore {
    /// Every document in `collection`, in backend order.
    fn list_documents(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<Vec<Document>, StoreError>>;

    /// Insert a document under a backend-generated key.
    fn create_document(
        &self,
        collection: &str,
        fields: Fields,
    ) -> impl Future<Output = Result<Document, StoreError>>;

    /// Remove `collection/{id}`. Succeeds when the document is already gone.
    fn delete_document(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<(), StoreError>>;
}

/// User records stored in a [`DocumentStore`].
#[derive(Clone, Debug)]
pub struct UserDirectory<S: DocumentStore> {
    store: S,
    collections: Collections,
}

impl<S: DocumentStore> UserDirectory<S> {
    pub fn new(store: S, collections: Collections) -> Self {
        Self { store, collections }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn collections(&self) -> &Collections {
        &self.collections
    }

    /// Read every valid user from the list collection.
    pub async fn fetch_users(&self) -> Result<Vec<User>, StoreError> {
        let docs = self.store.list_documents(&self.collections.list).await?;
        let users = users_from_documents(&docs);
        tracing::debug!(
            collection = %self.collections.list,
            documents = docs.len(),
            users = users.len(),
            "fetched users"
        );
        Ok(users)
    }

    /// Delete a user from the list collection.
    pub async fn remove_user(&self, id: &str) -> Result<(), StoreError> {
        self.store
            .delete_document(&self.collections.list, id)
            .await?;
        tracing::debug!(collection = %self.collections.list, %id, "removed user");
        Ok(())
    }

    /// Insert a user into the add collection and return its key.
    pub async fn add_user(&self, user: &NewUser) -> Result<String, StoreError> {
        let doc = self
            .store
            .create_document(&self.collections.add, user_document_fields(user))
            .await?;
        tracing::debug!(collection = %self.collections.add, id = %doc.id, "added user");
        Ok(doc.id)
    }
}

impl<S: DocumentStore + Clone + 'static> UserDirectory<S> {
    /// Validate `draft` and, if it passes, return the write that stores it.
    ///
    /// Nothing touches the backend until the returned future is polled, and an
    /// invalid draft never produces one.
    pub fn submit(
        &self,
        draft: &UserDraft,
    ) -> Result<impl Future<Output = Result<String, StoreError>> + 'static, DraftError> {
        let user = draft.validate()?;
        let directory = self.clone();
        Ok(async move { directory.add_user(&user).await })
    }
}
