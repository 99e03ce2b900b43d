//! json-server REST adapter for the `/usuarios` resource

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::domain::user::{User, UserBackend, UserDraft, UserId};
use crate::domain::DomainError;
use crate::infrastructure::http_client::{join_segment, HttpClientTrait};

pub const DEFAULT_JSON_SERVER_URL: &str = "http://localhost:3001";
pub const DEFAULT_RESOURCE: &str = "usuarios";

/// User backend talking to a generic REST resource
#[derive(Debug)]
pub struct JsonServerUserBackend<C: HttpClientTrait> {
    client: C,
    resource_url: String,
}

impl<C: HttpClientTrait> JsonServerUserBackend<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_JSON_SERVER_URL, DEFAULT_RESOURCE)
    }

    pub fn with_base_url(
        client: C,
        base_url: impl Into<String>,
        resource: impl AsRef<str>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let resource = resource.as_ref().trim_matches('/');

        Self {
            client,
            resource_url: format!("{}/{}", base_url, resource),
        }
    }

    pub fn resource_url(&self) -> &str {
        &self.resource_url
    }

    fn item_url(&self, id: &UserId) -> Result<String, DomainError> {
        join_segment(&self.resource_url, id.as_str())
    }

    fn draft_body(draft: &UserDraft) -> Result<Value, DomainError> {
        serde_json::to_value(draft)
            .map_err(|e| DomainError::internal(format!("Failed to encode user: {}", e)))
    }

    fn parse_user(json: Value) -> Result<User, DomainError> {
        serde_json::from_value(json).map_err(|e| {
            DomainError::backend("json-server", format!("Failed to parse user: {}", e))
        })
    }
}

#[async_trait]
impl<C: HttpClientTrait> UserBackend for JsonServerUserBackend<C> {
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        debug!(url = %self.resource_url, "Listing users");

        let json = self.client.get_json(&self.resource_url, &[]).await?;

        if json.is_null() {
            return Ok(Vec::new());
        }

        serde_json::from_value(json).map_err(|e| {
            DomainError::backend("json-server", format!("Failed to parse user list: {}", e))
        })
    }

    async fn create(&self, draft: &UserDraft) -> Result<User, DomainError> {
        let body = Self::draft_body(draft)?;
        let json = self.client.post_json(&self.resource_url, &[], &body).await?;
        let user = Self::parse_user(json)?;

        info!(id = %user.id(), "Created user");
        Ok(user)
    }

    async fn update(&self, id: &UserId, draft: &UserDraft) -> Result<User, DomainError> {
        let body = Self::draft_body(draft)?;
        let json = self.client.put_json(&self.item_url(id)?, &[], &body).await?;

        // Older json-server releases answer PUT with an empty body
        if json.is_null() {
            return Ok(User::new(id.clone(), draft.clone()));
        }

        let user = Self::parse_user(json)?;
        info!(id = %id, "Updated user");
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        self.client.delete(&self.item_url(id)?, &[]).await?;

        info!(id = %id, "Deleted user");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "json-server"
    }
}
