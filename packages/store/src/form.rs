//! Add-form input and its validation.

use crate::error::DraftError;
use crate::models::NewUser;

/// Raw text from the add form, exactly as typed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub age: String,
}

impl UserDraft {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        age: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            age: age.into(),
        }
    }

    /// Check the draft and produce the record to store.
    ///
    /// Age must parse as a whole number; surrounding whitespace is not accepted.
    /// Username and email only need to be non-empty.
    pub fn validate(&self) -> Result<NewUser, DraftError> {
        let age = self
            .age
            .parse::<i64>()
            .map_err(|_| DraftError::InvalidAge(self.age.clone()))?;
        if self.username.is_empty() {
            return Err(DraftError::EmptyUsername);
        }
        if self.email.is_empty() {
            return Err(DraftError::EmptyEmail);
        }
        Ok(NewUser {
            username: self.username.clone(),
            email: self.email.clone(),
            age,
        })
    }
}
