//! User form state: draft values and edit target

use colored::Colorize;

use crate::domain::user::{validate_draft, Field, FieldErrors, User, UserDraft, UserId};

/// The add/edit form
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    draft: UserDraft,
    edit_target: Option<UserId>,
}

impl UserForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &UserDraft {
        &self.draft
    }

    pub fn edit_target(&self) -> Option<&UserId> {
        self.edit_target.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.edit_target.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() { "Edit user" } else { "Add user" }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.draft.name,
            Field::Email => &self.draft.email,
            Field::Phone => &self.draft.phone,
        }
    }

    /// Set one draft value as typed; limits are enforced on submit
    pub fn set_field(&mut self, field: Field, value: &str) {
        let value = value.to_string();

        match field {
            Field::Name => self.draft.name = value,
            Field::Email => self.draft.email = value,
            Field::Phone => self.draft.phone = value,
        }
    }

    /// Copy a row into the draft and target it for update
    pub fn begin_edit(&mut self, user: &User) {
        self.draft = user.to_draft();
        self.edit_target = Some(user.id().clone());
    }

    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Empty draft, create mode
    pub fn reset(&mut self) {
        self.draft = UserDraft::default();
        self.edit_target = None;
    }

    /// Trimmed draft if every field passes against the loaded users
    pub fn validate(&self, users: &[User]) -> Result<UserDraft, FieldErrors> {
        let draft = self.draft.trimmed();
        validate_draft(&draft, users, self.edit_target.as_ref())?;
        Ok(draft)
    }

    pub fn render(&self, errors: &FieldErrors) -> String {
        let mut out = String::new();

        let title = match &self.edit_target {
            Some(id) => format!("{} #{}", self.title(), id),
            None => self.title().to_string(),
        };
        out.push_str(&format!("{}\n", title.bold()));

        for field in Field::ALL {
            let value = self.value(field);
            out.push_str(&format!("  {:<6} {}", field.label(), value));

            let count = value.chars().count();
            if count > field.max_length() {
                let counter = format!("({}/{})", count, field.max_length());
                out.push_str(&format!(" {}", counter.yellow()));
            }
            out.push('\n');

            if let Some(error) = errors.get(field) {
                out.push_str(&format!("         {}\n", error.to_string().red()));
            }
        }

        out
    }
}
