use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// Single dismissible banner shown above the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    kind: AlertKind,
    message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> AlertKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_error(&self) -> bool {
        self.kind == AlertKind::Error
    }

    pub fn render(&self) -> String {
        match self.kind {
            AlertKind::Success => format!("{} {}", "✔".green(), self.message.green()),
            AlertKind::Error => format!("{} {}", "✖".red(), self.message.red().bold()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_kinds() {
        let ok = Alert::success("User added");
        assert_eq!(ok.kind(), AlertKind::Success);
        assert!(!ok.is_error());

        let err = Alert::error("Error saving user");
        assert!(err.is_error());
        assert!(err.render().contains("Error saving user"));
    }
}
