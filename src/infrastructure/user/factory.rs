//! Backend factory for runtime backend selection

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::config::BackendConfig;
use crate::domain::user::UserBackend;
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClient;

use super::firestore::FirestoreUserBackend;
use super::in_memory::InMemoryUserBackend;
use super::json_server::JsonServerUserBackend;

/// Supported backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// json-server style REST resource
    #[default]
    #[serde(alias = "json-server", alias = "json_server", alias = "http")]
    Rest,
    /// Firestore document collection
    #[serde(alias = "firebase")]
    Firestore,
    /// Process-local store (for demos and testing)
    #[serde(alias = "in-memory", alias = "inmemory")]
    Memory,
}

impl BackendKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rest" | "json-server" | "json_server" | "http" => Some(Self::Rest),
            "firestore" | "firebase" => Some(Self::Firestore),
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::Memory),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Firestore => "firestore",
            Self::Memory => "memory",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Factory for creating user backends
#[derive(Debug)]
pub struct UserBackendFactory;

impl UserBackendFactory {
    /// Creates a backend instance based on the configuration
    pub fn create(config: &BackendConfig) -> Result<Arc<dyn UserBackend>, DomainError> {
        let backend: Arc<dyn UserBackend> = match config.kind {
            BackendKind::Rest => Arc::new(JsonServerUserBackend::with_base_url(
                Self::http_client(config)?,
                &config.rest.base_url,
                &config.rest.resource,
            )),
            BackendKind::Firestore => {
                let firestore = &config.firestore;

                if firestore.project_id.trim().is_empty() {
                    return Err(DomainError::configuration(
                        "backend.firestore.project_id is required for the firestore backend",
                    ));
                }

                Arc::new(
                    FirestoreUserBackend::new(Self::http_client(config)?, &firestore.project_id)
                        .with_base_url(&firestore.base_url)
                        .with_database(&firestore.database)
                        .with_collection(&firestore.collection)
                        .with_api_key(firestore.api_key.clone()),
                )
            }
            BackendKind::Memory => Arc::new(InMemoryUserBackend::new()),
        };

        info!(backend = backend.name(), "User backend ready");
        Ok(backend)
    }

    fn http_client(config: &BackendConfig) -> Result<HttpClient, DomainError> {
        match config.timeout_secs {
            Some(secs) => HttpClient::with_timeout(Duration::from_secs(secs)),
            None => Ok(HttpClient::new()),
        }
    }
}
