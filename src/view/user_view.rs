//! Form-and-table controller
//!
//! Holds the in-memory UI state and turns user actions into backend calls.
//! Every mutation is followed by a fresh list fetch; nothing is updated
//! optimistically.

use std::sync::Arc;

use colored::Colorize;
use tracing::{error, info, warn};

use crate::domain::user::{Field, FieldErrors, User, UserBackend, UserId};
use crate::domain::DomainError;

use super::alert::Alert;
use super::confirm::Confirm;
use super::form::UserForm;
use super::list::UserList;

pub const MSG_INVALID: &str = "Invalid data";
pub const MSG_ADDED: &str = "User added";
pub const MSG_UPDATED: &str = "User updated";
pub const MSG_DELETED: &str = "User deleted";
pub const MSG_LOAD_FAILED: &str = "Error loading users";
pub const MSG_SAVE_FAILED: &str = "Error saving user";
pub const MSG_DELETE_FAILED: &str = "Error deleting user";
pub const DELETE_PROMPT: &str = "Delete this user?";

/// Result of a submit action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(User),
    Updated(User),
    /// Validation failed; nothing was sent
    Invalid,
    /// The backend rejected or could not be reached
    Failed,
}

/// Result of a delete action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
    Failed,
}

/// The user management view
#[derive(Debug)]
pub struct UserView {
    backend: Arc<dyn UserBackend>,
    form: UserForm,
    list: UserList,
    errors: FieldErrors,
    alert: Option<Alert>,
}

impl UserView {
    pub fn new(backend: Arc<dyn UserBackend>) -> Self {
        Self {
            backend,
            form: UserForm::new(),
            list: UserList::new(),
            errors: FieldErrors::new(),
            alert: None,
        }
    }

    pub fn form(&self) -> &UserForm {
        &self.form
    }

    pub fn list(&self) -> &UserList {
        &self.list
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn set_field(&mut self, field: Field, value: &str) {
        self.form.set_field(field, value);
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Initial fetch
    pub async fn load(&mut self) -> bool {
        self.refresh().await
    }

    /// Re-fetch the list; on failure the previous rows stay visible
    pub async fn refresh(&mut self) -> bool {
        match self.backend.list().await {
            Ok(users) => {
                self.list.replace(users);
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to load users");
                self.alert = Some(Alert::error(MSG_LOAD_FAILED));
                false
            }
        }
    }

    /// Validate the draft, then create or update it
    pub async fn submit(&mut self) -> SubmitOutcome {
        let draft = match self.form.validate(self.list.users()) {
            Ok(draft) => draft,
            Err(errors) => {
                let rejection = DomainError::from(&errors);
                warn!(error = %rejection, fields = errors.len(), "Rejected invalid user draft");
                self.errors = errors;
                self.alert = Some(Alert::error(MSG_INVALID));
                return SubmitOutcome::Invalid;
            }
        };
        self.errors.clear();

        let result = match self.form.edit_target() {
            Some(id) => self
                .backend
                .update(id, &draft)
                .await
                .map(SubmitOutcome::Updated),
            None => self.backend.create(&draft).await.map(SubmitOutcome::Created),
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                if e.is_backend() {
                    error!(error = %e, "Failed to save user");
                } else {
                    warn!(error = %e, "User save refused");
                }
                self.alert = Some(Alert::error(MSG_SAVE_FAILED));
                return SubmitOutcome::Failed;
            }
        };

        match &outcome {
            SubmitOutcome::Created(user) => {
                info!(id = %user.id(), "User added");
                self.alert = Some(Alert::success(MSG_ADDED));
            }
            SubmitOutcome::Updated(user) => {
                info!(id = %user.id(), "User updated");
                self.alert = Some(Alert::success(MSG_UPDATED));
            }
            SubmitOutcome::Invalid | SubmitOutcome::Failed => {}
        }

        self.form.reset();
        self.refresh().await;

        outcome
    }

    /// Load a listed row into the form
    pub fn edit(&mut self, id: &UserId) -> Result<(), DomainError> {
        let user = self
            .list
            .find(id)
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        self.form.begin_edit(user);
        self.errors.clear();
        self.alert = None;
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.form.cancel();
        self.errors.clear();
        self.alert = None;
    }

    /// Confirm, delete, refresh
    pub async fn delete(&mut self, id: &UserId, confirm: &dyn Confirm) -> DeleteOutcome {
        if !confirm.confirm(DELETE_PROMPT) {
            return DeleteOutcome::Declined;
        }

        if let Err(e) = self.backend.delete(id).await {
            if e.is_backend() {
                error!(error = %e, id = %id, "Failed to delete user");
            } else {
                warn!(error = %e, id = %id, "User delete refused");
            }
            self.alert = Some(Alert::error(MSG_DELETE_FAILED));
            return DeleteOutcome::Failed;
        }

        info!(id = %id, "User deleted");
        self.alert = Some(Alert::success(MSG_DELETED));
        self.refresh().await;

        DeleteOutcome::Deleted
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("{}\n\n", "User management".bold().underline()));

        if let Some(alert) = &self.alert {
            out.push_str(&alert.render());
            out.push_str("\n\n");
        }

        out.push_str(&self.form.render(&self.errors));
        out.push('\n');
        out.push_str(&self.list.render());

        out
    }
}
