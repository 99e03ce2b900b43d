//! crud-usuarios
//!
//! User management over interchangeable persistence backends:
//! - json-server REST resource (`/usuarios`)
//! - Firestore document collection (`usuarios`)
//! - In-memory store for demos and tests
//!
//! The `view` module holds the form-and-table state; the `cli` module drives
//! it from the terminal.

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod view;

pub use config::AppConfig;
pub use domain::user::{User, UserBackend, UserDraft, UserId};
pub use domain::DomainError;
pub use view::UserView;
