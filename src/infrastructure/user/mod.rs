//! User infrastructure module
//!
//! Backend adapters for user persistence: json-server REST, Firestore REST
//! and an in-memory store, plus the factory choosing between them.

pub mod factory;
pub mod firestore;
mod in_memory;
pub mod json_server;

pub use factory::{BackendKind, UserBackendFactory};
pub use firestore::FirestoreUserBackend;
pub use in_memory::InMemoryUserBackend;
pub use json_server::JsonServerUserBackend;
