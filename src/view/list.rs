//! Read-only projection of the backend's user records

use colored::Colorize;

use crate::domain::user::{User, UserId};

pub const EMPTY_PLACEHOLDER: &str = "No users registered.";

const HEADERS: [&str; 4] = ["ID", "Name", "Email", "Phone"];

/// The user table, refilled after every fetch
#[derive(Debug, Clone, Default)]
pub struct UserList {
    users: Vec<User>,
}

impl UserList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, users: Vec<User>) {
        self.users = users;
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id() == id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn render(&self) -> String {
        if self.users.is_empty() {
            return format!("{}\n", EMPTY_PLACEHOLDER.dimmed());
        }

        let rows: Vec<[&str; 4]> = self
            .users
            .iter()
            .map(|u| [u.id().as_str(), u.name(), u.email(), u.phone()])
            .collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        out.push_str(&format_row(&HEADERS, &widths).bold().to_string());
        out.push('\n');
        out.push_str(&format_rule(&widths));
        out.push('\n');

        for row in &rows {
            out.push_str(&format_row(row, &widths));
            out.push('\n');
        }

        out
    }
}

fn format_row(cells: &[&str; 4], widths: &[usize; 4]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

fn format_rule(widths: &[usize; 4]) -> String {
    widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-")
}
