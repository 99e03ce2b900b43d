//! Backend adapter trait for user persistence

use async_trait::async_trait;
use std::fmt::Debug;

#[cfg(test)]
use mockall::automock;

use super::entity::{User, UserDraft, UserId};
use crate::domain::DomainError;

/// CRUD operations against the external store that owns the user records.
///
/// Implementations are pass-through: no retry, batching or caching.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserBackend: Send + Sync + Debug {
    /// List every user, ordered by name where the backend supports it
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Create a user; the backend assigns the id
    async fn create(&self, draft: &UserDraft) -> Result<User, DomainError>;

    /// Replace the values of an existing user
    async fn update(&self, id: &UserId, draft: &UserDraft) -> Result<User, DomainError>;

    /// Delete a user
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}
