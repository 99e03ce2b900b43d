//! In-memory user backend

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::user::{User, UserBackend, UserDraft, UserId};
use crate::domain::DomainError;

/// In-memory implementation of UserBackend
#[derive(Debug, Default)]
pub struct InMemoryUserBackend {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserBackend {
    /// Create a new empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend with initial users
    pub fn with_users(users: Vec<User>) -> Self {
        let users = users.into_iter().map(|u| (u.id().clone(), u)).collect();

        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserBackend for InMemoryUserBackend {
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));

        Ok(result)
    }

    async fn create(&self, draft: &UserDraft) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        let id = UserId::new(Uuid::new_v4().to_string());
        let user = User::new(id.clone(), draft.clone());
        users.insert(id, user.clone());

        Ok(user)
    }

    async fn update(&self, id: &UserId, draft: &UserDraft) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        let user = users
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;
        user.apply(draft);

        Ok(user.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        users
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
