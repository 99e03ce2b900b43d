//! Domain layer - Core entities, validation and backend traits

pub mod error;
pub mod user;

pub use error::DomainError;
