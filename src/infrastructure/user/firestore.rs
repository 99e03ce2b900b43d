//! Firestore adapter over the REST API v1
//!
//! Users are stored as documents in a single collection with the string
//! fields `nombre`, `correo` and `telefono`. The document id is assigned by
//! Firestore on create.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::domain::user::{User, UserBackend, UserDraft, UserId};
use crate::domain::DomainError;
use crate::infrastructure::http_client::{join_segment, HttpClientTrait};

pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com";
pub const DEFAULT_DATABASE: &str = "(default)";
pub const DEFAULT_COLLECTION: &str = "usuarios";

const FIELD_NAME: &str = "nombre";
const FIELD_EMAIL: &str = "correo";
const FIELD_PHONE: &str = "telefono";
const PAGE_SIZE: &str = "300";

/// User backend storing documents in a Firestore collection
#[derive(Debug)]
pub struct FirestoreUserBackend<C: HttpClientTrait> {
    client: C,
    base_url: String,
    project_id: String,
    database: String,
    collection: String,
    api_key: Option<String>,
}

impl<C: HttpClientTrait> FirestoreUserBackend<C> {
    pub fn new(client: C, project_id: impl Into<String>) -> Self {
        Self {
            client,
            base_url: DEFAULT_FIRESTORE_URL.to_string(),
            project_id: project_id.into(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            api_key: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }

    pub fn collection_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/{}/documents/{}",
            self.base_url, self.project_id, self.database, self.collection
        )
    }

    fn document_url(&self, id: &UserId) -> Result<String, DomainError> {
        join_segment(&self.collection_url(), id.as_str())
    }

    fn with_key<'a>(&'a self, mut query: Vec<(&'a str, &'a str)>) -> Vec<(&'a str, &'a str)> {
        if let Some(key) = &self.api_key {
            query.push(("key", key.as_str()));
        }
        query
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Document {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

impl Document {
    fn into_user(self) -> Result<User, DomainError> {
        let id = self
            .name
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                DomainError::backend(
                    "firestore",
                    format!("Document name '{}' has no id", self.name),
                )
            })?
            .to_string();

        let draft = UserDraft::new(
            decode_text(&self.fields, FIELD_NAME),
            decode_text(&self.fields, FIELD_EMAIL),
            decode_text(&self.fields, FIELD_PHONE),
        );

        Ok(User::new(UserId::new(id), draft))
    }
}

/// Read a scalar field as text; missing or non-scalar values read as empty
fn decode_text(fields: &Map<String, Value>, key: &str) -> String {
    let Some(Value::Object(typed)) = fields.get(key) else {
        return String::new();
    };

    match typed.iter().next() {
        Some((kind, Value::String(s))) if kind == "stringValue" || kind == "integerValue" => {
            s.clone()
        }
        Some((kind, Value::Number(n))) if kind == "integerValue" || kind == "doubleValue" => {
            n.to_string()
        }
        _ => String::new(),
    }
}

fn encode_fields(draft: &UserDraft) -> Value {
    json!({
        "fields": {
            FIELD_NAME: { "stringValue": draft.name },
            FIELD_EMAIL: { "stringValue": draft.email },
            FIELD_PHONE: { "stringValue": draft.phone },
        }
    })
}

fn parse_document(json: Value) -> Result<User, DomainError> {
    let document: Document = serde_json::from_value(json).map_err(|e| {
        DomainError::backend("firestore", format!("Failed to parse document: {}", e))
    })?;

    document.into_user()
}

#[async_trait]
impl<C: HttpClientTrait> UserBackend for FirestoreUserBackend<C> {
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let url = self.collection_url();
        let mut users = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            // Firestore leaves documents without a `nombre` field out of an ordered listing
            let mut query = vec![("orderBy", FIELD_NAME), ("pageSize", PAGE_SIZE)];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }
            let query = self.with_key(query);

            debug!(url = %url, page = page_token.is_some(), "Listing documents");
            let json = self.client.get_json(&url, &query).await?;

            let page: ListDocumentsResponse = serde_json::from_value(json).map_err(|e| {
                DomainError::backend("firestore", format!("Failed to parse document list: {}", e))
            })?;

            for document in page.documents {
                users.push(document.into_user()?);
            }

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(users)
    }

    async fn create(&self, draft: &UserDraft) -> Result<User, DomainError> {
        let query = self.with_key(Vec::new());
        let json = self
            .client
            .post_json(&self.collection_url(), &query, &encode_fields(draft))
            .await?;
        let user = parse_document(json)?;

        info!(id = %user.id(), "Created user document");
        Ok(user)
    }

    async fn update(&self, id: &UserId, draft: &UserDraft) -> Result<User, DomainError> {
        let query = self.with_key(vec![
            ("updateMask.fieldPaths", FIELD_NAME),
            ("updateMask.fieldPaths", FIELD_EMAIL),
            ("updateMask.fieldPaths", FIELD_PHONE),
            ("currentDocument.exists", "true"),
        ]);
        let json = self
            .client
            .patch_json(&self.document_url(id)?, &query, &encode_fields(draft))
            .await?;
        let user = parse_document(json)?;

        info!(id = %id, "Updated user document");
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let query = self.with_key(Vec::new());
        self.client.delete(&self.document_url(id)?, &query).await?;

        info!(id = %id, "Deleted user document");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "firestore"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    const COLLECTION: &str =
        "https://firestore.googleapis.com/v1/projects/demo/databases/(default)/documents/usuarios";

    fn document(id: &str, name: &str) -> Value {
        json!({
            "name": format!("projects/demo/databases/(default)/documents/usuarios/{}", id),
            "fields": {
                "nombre": {"stringValue": name},
                "correo": {"stringValue": format!("{}@example.com", id)},
                "telefono": {"stringValue": "5551234"}
            },
            "createTime": "2024-05-01T10:00:00Z"
        })
    }

    #[test]
    fn test_collection_url() {
        let backend = FirestoreUserBackend::new(MockHttpClient::new(), "demo");
        assert_eq!(backend.collection_url(), COLLECTION);

        let custom = FirestoreUserBackend::new(MockHttpClient::new(), "demo")
            .with_base_url("http://localhost:8080/")
            .with_database("staging")
            .with_collection("people");
        assert_eq!(
            custom.collection_url(),
            "http://localhost:8080/v1/projects/demo/databases/staging/documents/people"
        );
    }

    #[test]
    fn test_encode_fields() {
        let body = encode_fields(&UserDraft::new("Ana", "ana@example.com", "5551234"));
        assert_eq!(body["fields"]["nombre"]["stringValue"], "Ana");
        assert_eq!(body["fields"]["correo"]["stringValue"], "ana@example.com");
        assert_eq!(body["fields"]["telefono"]["stringValue"], "5551234");
    }

    #[test]
    fn test_decode_document() {
        let user = parse_document(document("abc123", "Ana")).unwrap();
        assert_eq!(user.id().as_str(), "abc123");
        assert_eq!(user.name(), "Ana");
        assert_eq!(user.email(), "abc123@example.com");
    }

    #[test]
    fn test_decode_integer_phone() {
        let user = parse_document(json!({
            "name": "projects/demo/databases/(default)/documents/usuarios/x1",
            "fields": {
                "nombre": {"stringValue": "Ana"},
                "telefono": {"integerValue": "3001234567"}
            }
        }))
        .unwrap();

        assert_eq!(user.phone(), "3001234567");
        assert_eq!(user.email(), "");
    }

    #[tokio::test]
    async fn test_list_empty_collection() {
        let client = MockHttpClient::new().with_response("GET", COLLECTION, json!({}));
        let backend = FirestoreUserBackend::new(client, "demo");

        assert!(backend.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_follows_page_tokens() {
        let client = MockHttpClient::new()
            .with_response(
                "GET",
                COLLECTION,
                json!({"documents": [document("a", "Ana")], "nextPageToken": "page-2"}),
            )
            .with_response("GET", COLLECTION, json!({"documents": [document("b", "Bob")]}));
        let backend = FirestoreUserBackend::new(client, "demo").with_api_key(Some("k".into()));

        let users = backend.list().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].id().as_str(), "b");

        let calls = backend.client.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].2.contains(&("orderBy".to_string(), "nombre".to_string())));
        assert!(calls[0].2.contains(&("key".to_string(), "k".to_string())));
        assert!(calls[1].2.contains(&("pageToken".to_string(), "page-2".to_string())));
    }

    #[tokio::test]
    async fn test_update_sends_field_mask() {
        let url = format!("{}/abc", COLLECTION);
        let client = MockHttpClient::new().with_response("PATCH", &url, document("abc", "Ana B"));
        let backend = FirestoreUserBackend::new(client, "demo");

        let user = backend
            .update(
                &UserId::new("abc"),
                &UserDraft::new("Ana B", "abc@example.com", "5551234"),
            )
            .await
            .unwrap();
        assert_eq!(user.name(), "Ana B");

        let calls = backend.client.calls();
        let masks: Vec<_> = calls[0]
            .2
            .iter()
            .filter(|(k, _)| k == "updateMask.fieldPaths")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(masks, vec!["nombre", "correo", "telefono"]);
        assert!(calls[0]
            .2
            .contains(&("currentDocument.exists".to_string(), "true".to_string())));
    }
}
