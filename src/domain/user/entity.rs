//! User entity and related types

use serde::{Deserialize, Serialize};

/// Backend-assigned user identifier.
///
/// json-server hands out numeric or string ids depending on its version,
/// Firestore uses opaque document ids. Both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawUserId", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawUserId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawUserId> for UserId {
    fn from(raw: RawUserId) -> Self {
        match raw {
            RawUserId::Text(s) => Self(s),
            RawUserId::Number(n) => Self(n.to_string()),
        }
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field values sent to the backend on create and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "correo", default)]
    pub email: String,
    #[serde(rename = "telefono", default)]
    pub phone: String,
}

impl UserDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Copy with surrounding whitespace removed from every field
    pub fn trimmed(&self) -> Self {
        Self::new(self.name.trim(), self.email.trim(), self.phone.trim())
    }

    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.phone.is_empty()
    }
}

/// A stored user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    #[serde(rename = "nombre", default)]
    name: String,
    #[serde(rename = "correo", default)]
    email: String,
    #[serde(rename = "telefono", default)]
    phone: String,
}

impl User {
    pub fn new(id: UserId, draft: UserDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
        }
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// The editable values of this record
    pub fn to_draft(&self) -> UserDraft {
        UserDraft::new(&self.name, &self.email, &self.phone)
    }

    /// Replace every editable value
    pub fn apply(&mut self, draft: &UserDraft) {
        self.name = draft.name.clone();
        self.email = draft.email.clone();
        self.phone = draft.phone.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_from_string_json() {
        let id: UserId = serde_json::from_str("\"a1b2\"").unwrap();
        assert_eq!(id.as_str(), "a1b2");
    }

    #[test]
    fn test_user_id_from_number_json() {
        let id: UserId = serde_json::from_str("7").unwrap();
        assert_eq!(id.as_str(), "7");
    }

    #[test]
    fn test_user_id_serializes_as_string() {
        let json = serde_json::to_string(&UserId::new("7")).unwrap();
        assert_eq!(json, "\"7\"");
    }

    #[test]
    fn test_user_uses_wire_field_names() {
        let user = User::new(
            UserId::new("1"),
            UserDraft::new("Ana", "ana@example.com", "555-1234"),
        );

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["nombre"], "Ana");
        assert_eq!(json["correo"], "ana@example.com");
        assert_eq!(json["telefono"], "555-1234");
    }

    #[test]
    fn test_user_from_json_server_record() {
        let user: User = serde_json::from_str(
            r#"{"id": 3, "nombre": "Bob", "correo": "bob@example.com", "telefono": "5551234"}"#,
        )
        .unwrap();

        assert_eq!(user.id().as_str(), "3");
        assert_eq!(user.name(), "Bob");
        assert_eq!(user.email(), "bob@example.com");
        assert_eq!(user.phone(), "5551234");
    }

    #[test]
    fn test_user_missing_fields_default_to_empty() {
        let user: User = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert_eq!(user.name(), "");
        assert_eq!(user.email(), "");
    }

    #[test]
    fn test_draft_trimmed() {
        let draft = UserDraft::new("  Ana ", " ana@example.com", "555 1234 ");
        assert_eq!(
            draft.trimmed(),
            UserDraft::new("Ana", "ana@example.com", "555 1234")
        );
        assert!(UserDraft::default().is_blank());
    }

    #[test]
    fn test_user_apply_draft() {
        let mut user = User::new(UserId::new("1"), UserDraft::new("Ana", "a@b.co", "5551234"));
        user.apply(&UserDraft::new("Ana María", "am@b.co", "5559999"));

        assert_eq!(user.id().as_str(), "1");
        assert_eq!(user.name(), "Ana María");
        assert_eq!(user.to_draft().email, "am@b.co");
    }
}
