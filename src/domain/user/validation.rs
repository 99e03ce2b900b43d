//! User field validation
//!
//! Checks run before any backend call. A failing draft never leaves the
//! process.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::entity::{User, UserDraft, UserId};
use crate::domain::DomainError;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Name is required")]
    EmptyName,

    #[error("Name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("Email is required")]
    EmptyEmail,

    #[error("Email must look like user@domain.tld")]
    InvalidEmail,

    #[error("Email exceeds maximum length of {0} characters")]
    EmailTooLong(usize),

    #[error("Email '{0}' is already registered")]
    DuplicateEmail(String),

    #[error("Phone is required")]
    EmptyPhone,

    #[error("Phone must be {0}-{1} characters of digits, spaces, '-' or '+'")]
    InvalidPhone(usize, usize),
}

pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_EMAIL_LENGTH: usize = 60;
pub const MIN_PHONE_LENGTH: usize = 7;
pub const MAX_PHONE_LENGTH: usize = 15;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\s\-+]{7,15}$").expect("valid phone regex"));

/// Validate a name
///
/// Rules:
/// - Cannot be blank
/// - Maximum 50 characters
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    if name.trim().is_empty() {
        return Err(UserValidationError::EmptyName);
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(UserValidationError::NameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

/// Validate the shape of an email address
///
/// Rules:
/// - Cannot be blank
/// - Must match `local@domain.tld` with no whitespace
/// - Maximum 60 characters
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.trim().is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if !EMAIL_PATTERN.is_match(email) {
        return Err(UserValidationError::InvalidEmail);
    }

    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(UserValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    Ok(())
}

/// Validate that no other loaded user owns this email.
///
/// `editing` is excluded so a record can keep its own address.
pub fn validate_email_unique(
    email: &str,
    users: &[User],
    editing: Option<&UserId>,
) -> Result<(), UserValidationError> {
    let wanted = email.trim().to_lowercase();

    let taken = users
        .iter()
        .filter(|u| Some(u.id()) != editing)
        .any(|u| u.email().trim().to_lowercase() == wanted);

    if taken {
        return Err(UserValidationError::DuplicateEmail(email.trim().to_string()));
    }

    Ok(())
}

/// Validate a phone number
///
/// Rules:
/// - Cannot be blank
/// - 7 to 15 characters, each a digit, whitespace, '-' or '+'
pub fn validate_phone(phone: &str) -> Result<(), UserValidationError> {
    if phone.trim().is_empty() {
        return Err(UserValidationError::EmptyPhone);
    }

    if !PHONE_PATTERN.is_match(phone) {
        return Err(UserValidationError::InvalidPhone(
            MIN_PHONE_LENGTH,
            MAX_PHONE_LENGTH,
        ));
    }

    Ok(())
}

/// Form fields that can carry a validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Phone];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
        }
    }

    /// Maximum accepted length for the field
    pub fn max_length(&self) -> usize {
        match self {
            Self::Name => MAX_NAME_LENGTH,
            Self::Email => MAX_EMAIL_LENGTH,
            Self::Phone => MAX_PHONE_LENGTH,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "name" | "nombre" => Some(Self::Name),
            "email" | "correo" => Some(Self::Email),
            "phone" | "telefono" | "teléfono" => Some(Self::Phone),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One validation message per failing field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, UserValidationError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, error: UserValidationError) {
        self.errors.entry(field).or_insert(error);
    }

    pub fn get(&self, field: Field) -> Option<&UserValidationError> {
        self.errors.get(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &UserValidationError)> {
        self.errors.iter().map(|(f, e)| (*f, e))
    }
}

/// A draft rejected only for a taken email is a conflict, anything else is
/// a validation failure
impl From<&FieldErrors> for DomainError {
    fn from(errors: &FieldErrors) -> Self {
        let summary = errors
            .iter()
            .map(|(field, error)| format!("{}: {}", field, error))
            .collect::<Vec<_>>()
            .join("; ");

        let only_duplicate = errors
            .iter()
            .all(|(_, error)| matches!(error, UserValidationError::DuplicateEmail(_)));

        if !errors.is_empty() && only_duplicate {
            DomainError::conflict(summary)
        } else {
            DomainError::validation(summary)
        }
    }
}

/// Validate a whole draft against the currently loaded users
pub fn validate_draft(
    draft: &UserDraft,
    users: &[User],
    editing: Option<&UserId>,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if let Err(e) = validate_name(&draft.name) {
        errors.insert(Field::Name, e);
    }

    if let Err(e) = validate_email(&draft.email)
        .and_then(|_| validate_email_unique(&draft.email, users, editing))
    {
        errors.insert(Field::Email, e);
    }

    if let Err(e) = validate_phone(&draft.phone) {
        errors.insert(Field::Phone, e);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
