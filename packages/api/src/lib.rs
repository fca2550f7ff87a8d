//! # API crate: client for the hosted document database
//!
//! Everything the app needs to reach its backend. The UI never uses these types
//! directly; it goes through [`store::UserDirectory`], which is generic over
//! [`store::DocumentStore`]. This crate supplies the store implementation and the
//! configuration that picks it.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | [`BackendConfig`]: project, credentials, paging, timeouts and collection names, layered from defaults, `firebase.toml`, `.env` and `USERS_*` environment variables |
//! | [`wire`] | Serde types for Firestore's typed-value JSON and conversions to [`store::FieldValue`] |
//! | [`firestore`] | [`FirestoreClient`], a `reqwest` implementation of `DocumentStore` over the Firestore v1 REST API |
//! | [`backend`] | [`Backend`], the Firestore client or an in-memory store, chosen by [`Backend::connect`] |

pub mod backend;
pub mod config;
pub mod firestore;
pub mod wire;

pub use backend::Backend;
pub use self::config::{BackendConfig, FirebaseConfig};
pub use firestore::FirestoreClient;
pub use ::config::ConfigError;

pub use store::{Collections, StoreError};
