//! User domain
//!
//! This module provides the user record, its field validation and the
//! backend adapter trait used to persist it.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserDraft, UserId};
pub use repository::UserBackend;
pub use validation::{
    validate_draft, validate_email, validate_email_unique, validate_name, validate_phone, Field,
    FieldErrors, UserValidationError, MAX_EMAIL_LENGTH, MAX_NAME_LENGTH, MAX_PHONE_LENGTH,
    MIN_PHONE_LENGTH,
};

#[cfg(test)]
pub use repository::MockUserBackend;
