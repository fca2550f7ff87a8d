//! Backend configuration: defaults, then `firebase.toml`, then `.env`/environment.
//!
//! Environment keys use the `USERS_` prefix and `__` between sections, e.g.
//! `USERS_FIREBASE__PROJECT_ID=my-project` or `USERS_COLLECTIONS__ADD=users`.
//! An empty `firebase.project_id` selects the in-memory backend.

use config::{Config, ConfigError, Environment, File, FileFormat, Source};
use serde::Deserialize;
use store::Collections;

pub const CONFIG_FILE: &str = "firebase.toml";
pub const ENV_PREFIX: &str = "USERS";
pub const DEFAULT_ENDPOINT: &str = "https://firestore.googleapis.com";
pub const DEFAULT_DATABASE: &str = "(default)";
pub const DEFAULT_PAGE_SIZE: u32 = 300;

/// Connection settings for the hosted Firestore project.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FirebaseConfig {
    pub project_id: String,
    pub database: String,
    /// Web API key, sent as the `key` query parameter.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Firebase Auth ID token, sent as a bearer token.
    #[serde(default)]
    pub id_token: Option<String>,
    pub endpoint: String,
    /// Documents requested per list page. 0 lets the server choose.
    pub page_size: u32,
    /// Per-request timeout. 0 means none.
    pub timeout_secs: u64,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            database: DEFAULT_DATABASE.to_string(),
            api_key: None,
            id_token: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BackendConfig {
    pub firebase: FirebaseConfig,
    pub collections: Collections,
}

impl BackendConfig {
    /// Load from `firebase.toml` (optional) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_sources(
            File::with_name(CONFIG_FILE)
                .format(FileFormat::Toml)
                .required(false),
            environment(),
        )
    }

    fn from_sources<F>(file: F, env: Environment) -> Result<Self, ConfigError>
    where
        F: Source + Send + Sync + 'static,
    {
        let defaults = Self::default();
        let config = Config::builder()
            .set_default("firebase.project_id", defaults.firebase.project_id)?
            .set_default("firebase.database", defaults.firebase.database)?
            .set_default("firebase.endpoint", defaults.firebase.endpoint)?
            .set_default("firebase.page_size", i64::from(defaults.firebase.page_size))?
            .set_default("firebase.timeout_secs", defaults.firebase.timeout_secs as i64)?
            .set_default("collections.list", defaults.collections.list)?
            .set_default("collections.add", defaults.collections.add)?
            .add_source(file)
            .add_source(env)
            .build()?;

        config.try_deserialize()
    }

    /// Whether a hosted project is configured.
    pub fn uses_remote(&self) -> bool {
        !self.firebase.project_id.trim().is_empty()
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}
