//! Terminal view layer
//!
//! The form, the table and the banner, plus the controller that ties them to
//! a user backend.

mod alert;
mod confirm;
mod form;
mod list;
mod user_view;

pub use alert::{Alert, AlertKind};
pub use confirm::{AlwaysConfirm, Confirm};
pub use form::UserForm;
pub use list::{UserList, EMPTY_PLACEHOLDER};
pub use user_view::{DeleteOutcome, SubmitOutcome, UserView, DELETE_PROMPT};
