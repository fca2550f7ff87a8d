//! # Collection names
//!
//! The list screen and the add form each address one collection:
//!
//! ```toml
//! [collections]
//! list = "users"   # read and deleted from by the list screen
//! add = "pie"      # written to by the add form
//! ```
//!
//! The defaults match the shipped app: records created by the add form land in `pie`
//! and never show up in the list, which reads `users`.
//! Setting `add = "users"` makes new records visible after the next refresh.
//!
//! All fields carry serde defaults so a missing section is equivalent to
//! [`Collections::default`].

use serde::{Deserialize, Serialize};

/// Which collections the two screens talk to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collections {
    /// Collection the list screen reads and deletes from.
    #[serde(default = "default_list_collection")]
    pub list: String,
    /// Collection the add form writes to.
    #[serde(default = "default_add_collection")]
    pub add: String,
}

fn default_list_collection() -> String {
    "users".to_string()
}

fn default_add_collection() -> String {
    "pie".to_string()
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            list: default_list_collection(),
            add: default_add_collection(),
        }
    }
}

impl Collections {
    /// Point both screens at the same collection.
    pub fn unified(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            list: name.clone(),
            add: name,
        }
    }

    /// Whether records created by the add form can ever appear in the list.
    pub fn add_is_listed(&self) -> bool {
        self.list == self.add
    }
}
