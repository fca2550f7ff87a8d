//! # User records and how they map to documents
//!
//! The list screen and the add form agree on one record shape. This module is the
//! single place where that shape is turned into documents and back.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | A user as rendered by the list screen. Rebuilt from scratch on every fetch; never cached or edited. |
//! | [`NewUser`] | A validated add-form submission, not yet stored. |
//!
//! ## Mapping
//!
//! - [`user_from_document`]: read path. Requires `username` and `email` to be strings
//!   and `age` to be an integer; anything else yields `None` and the record is skipped.
//!   A stored `isAdult` field is ignored and recomputed from `age`.
//! - [`user_document_fields`]: write path. Always writes `isAdult` alongside the
//!   three input fields.
//!
//! Both paths derive adulthood through [`is_adult`].

use serde::{Deserialize, Serialize};

use crate::document::{Document, FieldValue, Fields};

pub const USERNAME: &str = "username";
pub const EMAIL: &str = "email";
pub const AGE: &str = "age";
pub const IS_ADULT: &str = "isAdult";

/// Age at which a user counts as an adult.
pub const ADULT_AGE: i64 = 18;

pub fn is_adult(age: i64) -> bool {
    age >= ADULT_AGE
}

/// A user record read back from the list collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Backend key of the document this user was read from.
    pub id: String,
    pub username: String,
    pub email: String,
    pub age: i64,
    pub is_adult: bool,
}

/// A user that passed add-form validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub age: i64,
}

impl NewUser {
    pub fn is_adult(&self) -> bool {
        is_adult(self.age)
    }
}

/// Map a stored document to a [`User`], or `None` if it lacks the required fields.
pub fn user_from_document(doc: &Document) -> Option<User> {
    let username = doc.field(USERNAME)?.as_str()?;
    let email = doc.field(EMAIL)?.as_str()?;
    let age = doc.field(AGE)?.as_integer()?;

    Some(User {
        id: doc.id.clone(),
        username: username.to_string(),
        email: email.to_string(),
        age,
        is_adult: is_adult(age),
    })
}

/// Map documents to users, keeping backend order and skipping malformed records.
pub fn users_from_documents(docs: &[Document]) -> Vec<User> {
    docs.iter()
        .filter_map(|doc| {
            let user = user_from_document(doc);
            if user.is_none() {
                tracing::debug!(id = %doc.id, "skipping document without a valid user shape");
            }
            user
        })
        .collect()
}

/// The fields written for a new user.
pub fn user_document_fields(user: &NewUser) -> Fields {
    Fields::from([
        (USERNAME.to_string(), FieldValue::String(user.username.clone())),
        (EMAIL.to_string(), FieldValue::String(user.email.clone())),
        (AGE.to_string(), FieldValue::Integer(user.age)),
        (IS_ADULT.to_string(), FieldValue::Boolean(user.is_adult())),
    ])
}
