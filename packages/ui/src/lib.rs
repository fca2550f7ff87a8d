//! This crate contains all shared UI for the workspace.

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod directory;
pub use directory::{make_directory, use_directory, use_submit_user, Directory};

pub mod views;

mod user_row;
pub use user_row::UserRow;
