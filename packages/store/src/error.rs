//! Error types shared by every [`crate::DocumentStore`] implementation and the add form.

use thiserror::Error;

/// A backend call that did not complete.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The backend could not be reached (network, TLS, offline store).
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with a failure status.
    #[error("backend rejected request ({code}): {message}")]
    Status { code: u16, message: String },

    /// The backend answered with a payload we could not understand.
    #[error("unexpected backend response: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn unavailable(err: impl ToString) -> Self {
        Self::Unavailable(err.to_string())
    }

    pub fn decode(err: impl ToString) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Why an add-form draft was not submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("username is empty")]
    EmptyUsername,

    #[error("email is empty")]
    EmptyEmail,

    #[error("age {0:?} is not a whole number")]
    InvalidAge(String),
}
