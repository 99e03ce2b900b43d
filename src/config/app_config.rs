use std::path::Path;

use serde::Deserialize;

use crate::infrastructure::user::factory::BackendKind;
use crate::infrastructure::user::firestore::{
    DEFAULT_COLLECTION, DEFAULT_DATABASE, DEFAULT_FIRESTORE_URL,
};
use crate::infrastructure::user::json_server::{DEFAULT_JSON_SERVER_URL, DEFAULT_RESOURCE};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which persistence service to use and how to reach it
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,
    /// Request timeout in seconds; unset means no timeout
    pub timeout_secs: Option<u64>,
    pub rest: RestConfig,
    pub firestore: FirestoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RestConfig {
    pub base_url: String,
    pub resource: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FirestoreConfig {
    pub base_url: String,
    pub project_id: String,
    pub api_key: Option<String>,
    pub database: String,
    pub collection: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            timeout_secs: None,
            rest: RestConfig::default(),
            firestore: FirestoreConfig::default(),
        }
    }
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_JSON_SERVER_URL.to_string(),
            resource: DEFAULT_RESOURCE.to_string(),
        }
    }
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FIRESTORE_URL.to_string(),
            project_id: String::new(),
            api_key: None,
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Layered load: defaults, `config/default`, `config/local`, an optional
    /// explicit file, then `APP__*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
