use crud_usuarios::domain::user::{UserBackend, UserDraft, UserId};
use crud_usuarios::infrastructure::http_client::HttpClient;
use crud_usuarios::infrastructure::user::FirestoreUserBackend;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COLLECTION_PATH: &str = "/v1/projects/crud-demo/databases/(default)/documents/usuarios";

fn backend(server: &MockServer) -> FirestoreUserBackend<HttpClient> {
    FirestoreUserBackend::new(HttpClient::new(), "crud-demo")
        .with_base_url(server.uri())
        .with_api_key(Some("test-key".to_string()))
}

fn document(id: &str, name: &str, email: &str) -> Value {
    json!({
        "name": format!("projects/crud-demo/databases/(default)/documents/usuarios/{}", id),
        "fields": {
            "nombre": {"stringValue": name},
            "correo": {"stringValue": email},
            "telefono": {"stringValue": "5551234"}
        },
        "createTime": "2024-05-01T10:00:00.000000Z",
        "updateTime": "2024-05-01T10:00:00.000000Z"
    })
}

#[tokio::test]
async fn test_list_ordered_by_name_with_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .and(query_param("orderBy", "nombre"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                document("A1", "Ana", "ana@example.com"),
                document("B2", "Bob", "bob@example.com")
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let users = backend(&server).list().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id().as_str(), "A1");
    assert_eq!(users[1].email(), "bob@example.com");
}

#[tokio::test]
async fn test_list_empty_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    assert!(backend(&server).list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_posts_typed_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COLLECTION_PATH))
        .and(body_json(json!({
            "fields": {
                "nombre": {"stringValue": "Ana"},
                "correo": {"stringValue": "ana@example.com"},
                "telefono": {"stringValue": "5551234"}
            }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(document("NewId", "Ana", "ana@example.com")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let user = backend(&server)
        .create(&UserDraft::new("Ana", "ana@example.com", "5551234"))
        .await
        .unwrap();

    assert_eq!(user.id().as_str(), "NewId");
    assert_eq!(user.name(), "Ana");
}

#[tokio::test]
async fn test_update_patches_document() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(format!("{}/A1", COLLECTION_PATH)))
        .and(query_param("updateMask.fieldPaths", "correo"))
        .and(query_param("currentDocument.exists", "true"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(document("A1", "Ana", "ana.b@example.com")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let user = backend(&server)
        .update(
            &UserId::new("A1"),
            &UserDraft::new("Ana", "ana.b@example.com", "5551234"),
        )
        .await
        .unwrap();

    assert_eq!(user.email(), "ana.b@example.com");
}

#[tokio::test]
async fn test_update_missing_document_fails() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(format!("{}/gone", COLLECTION_PATH)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": 404, "status": "NOT_FOUND"}
        })))
        .mount(&server)
        .await;

    let result = backend(&server)
        .update(
            &UserId::new("gone"),
            &UserDraft::new("Ana", "ana@example.com", "5551234"),
        )
        .await;

    assert!(result.unwrap_err().is_backend());
}

#[tokio::test]
async fn test_delete_document() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("{}/A1", COLLECTION_PATH)))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    backend(&server).delete(&UserId::new("A1")).await.unwrap();
}

#[tokio::test]
async fn test_update_encodes_document_id() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(format!("{}/a%2Fb", COLLECTION_PATH)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(document("a%2Fb", "Ana", "ana@example.com")),
        )
        .expect(1)
        .mount(&server)
        .await;

    backend(&server)
        .update(
            &UserId::new("a/b"),
            &UserDraft::new("Ana", "ana@example.com", "5551234"),
        )
        .await
        .unwrap();
}
