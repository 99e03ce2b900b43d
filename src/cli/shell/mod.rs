//! Shell command - interactive form-and-table session over one view

use std::io::{self, BufRead, Write};

use crate::domain::user::{Field, UserId};
use crate::view::{Confirm, UserView};

use super::{bootstrap, GlobalArgs, StdinConfirm};

const HELP: &str = "\
Commands:
  list                  re-fetch and show users
  set <field> <value>   set name, email or phone in the draft
  submit                add the draft, or update the user being edited
  edit <id>             load a user into the form
  cancel                clear the draft and leave edit mode
  delete <id>           delete a user (asks for confirmation)
  dismiss               hide the current message
  show                  redraw the screen
  help                  show this help
  quit                  leave the shell";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Set(Field, String),
    Submit,
    Edit(UserId),
    Cancel,
    Delete(UserId),
    Dismiss,
    Show,
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_lowercase().as_str() {
            "list" | "ls" | "refresh" => Self::List,
            "set" => {
                let (name, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(n, v)| (n, v.trim()))
                    .unwrap_or((rest, ""));
                let field = Field::from_str(name)
                    .ok_or_else(|| format!("unknown field '{}', expected name, email or phone", name))?;
                Self::Set(field, value.to_string())
            }
            "submit" | "save" => Self::Submit,
            "edit" => Self::Edit(UserId::new(required_id(rest)?)),
            "cancel" => Self::Cancel,
            "delete" | "rm" => Self::Delete(UserId::new(required_id(rest)?)),
            "dismiss" => Self::Dismiss,
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(format!("unknown command '{}', type 'help'", other)),
        };

        Ok(Some(command))
    }
}

fn required_id(rest: &str) -> Result<&str, String> {
    if rest.is_empty() {
        Err("missing user id".to_string())
    } else {
        Ok(rest)
    }
}

/// Run the interactive shell
pub async fn run(global: &GlobalArgs) -> anyhow::Result<()> {
    let mut view = bootstrap(global)?;
    view.load().await;
    print!("{}", view.render());
    println!("\nType 'help' for commands.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match ShellCommand::parse(&line) {
            Ok(None) => continue,
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(ShellCommand::Help)) => println!("{}", HELP),
            Ok(Some(command)) => {
                execute(&mut view, command, &StdinConfirm).await;
                print!("{}", view.render());
            }
            Err(message) => println!("{}", message),
        }
    }

    Ok(())
}

/// Apply one command to the view
pub async fn execute(view: &mut UserView, command: ShellCommand, confirm: &dyn Confirm) {
    match command {
        ShellCommand::List => {
            view.refresh().await;
        }
        ShellCommand::Set(field, value) => view.set_field(field, &value),
        ShellCommand::Submit => {
            view.submit().await;
        }
        ShellCommand::Edit(id) => {
            if let Err(e) = view.edit(&id) {
                println!("{}", e);
            }
        }
        ShellCommand::Cancel => view.cancel(),
        ShellCommand::Delete(id) => {
            view.delete(&id, confirm).await;
        }
        ShellCommand::Dismiss => view.dismiss_alert(),
        ShellCommand::Show | ShellCommand::Help | ShellCommand::Quit => {}
    }
}
