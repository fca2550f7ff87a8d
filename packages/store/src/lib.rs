pub mod config;
pub mod document;
pub mod error;
pub mod form;
pub mod models;
pub mod repo;
pub mod roster;
pub mod sync;

mod memory;
pub use memory::{MemoryStore, Operation};

pub use config::Collections;
pub use document::{Document, FieldValue, Fields};
pub use error::{DraftError, StoreError};
pub use form::UserDraft;
pub use models::{NewUser, User};
pub use repo::{DocumentStore, UserDirectory};
pub use roster::{FetchTicket, Phase, Roster, RosterEvent};
pub use sync::{ListSync, UiDispatcher};
