//! One-shot commands: list, add, update, delete

use anyhow::bail;
use clap::Args;

use crate::domain::user::{Field, UserId};
use crate::view::{AlwaysConfirm, Confirm, DeleteOutcome, SubmitOutcome, UserView};

use super::{bootstrap, GlobalArgs, StdinConfirm};

/// Arguments for the add command
#[derive(Args, Clone, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,
}

/// Arguments for the update command; omitted fields keep their stored value
#[derive(Args, Clone, Debug)]
pub struct UpdateArgs {
    /// Id of the user to update
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,
}

/// Arguments for the delete command
#[derive(Args, Clone, Debug)]
pub struct DeleteArgs {
    /// Id of the user to delete
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub async fn list(global: &GlobalArgs) -> anyhow::Result<()> {
    let mut view = bootstrap(global)?;
    view.load().await;

    print!("{}", view.list().render());
    finish(&view)
}

pub async fn add(global: &GlobalArgs, args: AddArgs) -> anyhow::Result<()> {
    let mut view = bootstrap(global)?;
    if !view.load().await {
        return finish(&view);
    }

    view.set_field(Field::Name, &args.name);
    view.set_field(Field::Email, &args.email);
    view.set_field(Field::Phone, &args.phone);

    submit_and_report(&mut view).await
}

pub async fn update(global: &GlobalArgs, args: UpdateArgs) -> anyhow::Result<()> {
    let mut view = bootstrap(global)?;
    if !view.load().await {
        return finish(&view);
    }

    view.edit(&UserId::new(&args.id))?;
    apply_updates(&mut view, &args);

    submit_and_report(&mut view).await
}

/// Overwrite only the fields given on the command line
fn apply_updates(view: &mut UserView, args: &UpdateArgs) {
    let overrides = [
        (Field::Name, &args.name),
        (Field::Email, &args.email),
        (Field::Phone, &args.phone),
    ];

    for (field, value) in overrides {
        if let Some(value) = value {
            view.set_field(field, value);
        }
    }
}

pub async fn delete(global: &GlobalArgs, args: DeleteArgs) -> anyhow::Result<()> {
    let mut view = bootstrap(global)?;

    let confirm: &dyn Confirm = if args.yes { &AlwaysConfirm } else { &StdinConfirm };

    match view.delete(&UserId::new(args.id), confirm).await {
        DeleteOutcome::Declined => Ok(()),
        DeleteOutcome::Deleted | DeleteOutcome::Failed => {
            print!("{}", view.render());
            finish(&view)
        }
    }
}

async fn submit_and_report(view: &mut UserView) -> anyhow::Result<()> {
    let outcome = view.submit().await;
    print!("{}", view.render());

    match outcome {
        SubmitOutcome::Created(user) | SubmitOutcome::Updated(user) => {
            println!("\nid: {}", user.id());
            finish(view)
        }
        SubmitOutcome::Invalid | SubmitOutcome::Failed => finish(view),
    }
}

/// Fail the command when the view ended on an error banner
fn finish(view: &UserView) -> anyhow::Result<()> {
    match view.alert() {
        Some(alert) if alert.is_error() => bail!("{}", alert.message()),
        _ => Ok(()),
    }
}
