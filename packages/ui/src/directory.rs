//! Shared users directory constructor for all platforms.
//!
//! The app shell builds one [`Directory`] at startup with [`make_directory`] and
//! provides it as context; views read it back with [`use_directory`]. Tests and
//! previews can provide a directory over any other backend instead.

use dioxus::prelude::*;
use store::{DocumentStore, UserDirectory, UserDraft};

/// The directory type every view works against.
pub type Directory = store::UserDirectory<api::Backend>;

/// Build the directory from `firebase.toml` / environment configuration.
///
/// Falls back to the default configuration, and to the in-memory backend, when
/// loading fails. Neither failure is fatal for the app.
pub fn make_directory() -> Directory {
    let config = match api::BackendConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load backend config, using defaults: {e}");
            api::BackendConfig::default()
        }
    };

    let backend = match api::Backend::connect(&config) {
        Ok(backend) => backend,
        Err(e) => {
            tracing::error!("Failed to create Firestore client: {e}");
            api::Backend::Memory(store::MemoryStore::new())
        }
    };

    if !config.collections.add_is_listed() {
        tracing::warn!(
            list = %config.collections.list,
            add = %config.collections.add,
            "new users are written to a collection the list does not read"
        );
    }

    store::UserDirectory::new(backend, config.collections)
}

/// The directory provided by the app shell.
pub fn use_directory() -> Directory {
    use_context::<Directory>()
}

/// Validate a draft and start its write from the calling component.
///
/// The callback returns `false` for an invalid draft and touches nothing. A valid
/// draft's write is spawned in the scope of the component that called this hook, so
/// it keeps running after the sheet that produced the draft is gone.
pub fn use_submit_user<S>(directory: UserDirectory<S>) -> Callback<UserDraft, bool>
where
    S: DocumentStore + Clone + 'static,
{
    use_callback(move |draft: UserDraft| match directory.submit(&draft) {
        Ok(write) => {
            spawn(async move {
                if let Err(e) = write.await {
                    tracing::error!("Error adding user: {e}");
                }
            });
            true
        }
        Err(e) => {
            tracing::debug!("not saving user: {e}");
            false
        }
    })
}
