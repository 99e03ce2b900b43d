//! CLI module for crud-usuarios
//!
//! Provides subcommands for managing users against the configured backend:
//! - `list`, `add`, `update`, `delete`: one-shot actions
//! - `shell`: interactive form-and-table session

pub mod crud;
pub mod shell;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::user::{BackendKind, UserBackendFactory};
use crate::view::{Confirm, UserView};

/// crud-usuarios - manage users stored in json-server or Firestore
#[derive(Parser)]
#[command(name = "crud-usuarios")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand
#[derive(Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// Backend to use: rest, firestore or memory (overrides config)
    #[arg(long, global = true, value_parser = parse_backend)]
    pub backend: Option<BackendKind>,

    /// Base URL of the selected backend (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Extra configuration file layered over config/default and config/local
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List all users
    List,

    /// Add a user
    Add(crud::AddArgs),

    /// Update a user by id
    Update(crud::UpdateArgs),

    /// Delete a user by id
    Delete(crud::DeleteArgs),

    /// Interactive form-and-table session
    Shell,
}

fn parse_backend(s: &str) -> Result<BackendKind, String> {
    BackendKind::from_str(s)
        .ok_or_else(|| format!("unknown backend '{}', expected rest, firestore or memory", s))
}

/// Resolve configuration, start logging and build a view over the backend
pub fn bootstrap(global: &GlobalArgs) -> anyhow::Result<UserView> {
    dotenvy::dotenv().ok();

    let mut config =
        AppConfig::load(global.config.as_deref()).context("Failed to load configuration")?;
    apply_overrides(&mut config, global);

    logging::init_logging(&config.logging);

    let backend = UserBackendFactory::create(&config.backend)?;
    Ok(UserView::new(backend))
}

fn apply_overrides(config: &mut AppConfig, global: &GlobalArgs) {
    if let Some(kind) = global.backend {
        config.backend.kind = kind;
    }

    if let Some(url) = &global.api_url {
        match config.backend.kind {
            BackendKind::Rest => config.backend.rest.base_url = url.clone(),
            BackendKind::Firestore => config.backend.firestore.base_url = url.clone(),
            BackendKind::Memory => {}
        }
    }
}

/// y/N prompt on the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }

        is_yes(&line)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí"
    )
}
