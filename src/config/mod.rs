//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, BackendConfig, FirestoreConfig, LogFormat, LoggingConfig, RestConfig,
};
