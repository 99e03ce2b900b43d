use clap::Parser;
use crud_usuarios::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::List => cli::crud::list(&cli.global).await,
        Command::Add(args) => cli::crud::add(&cli.global, args).await,
        Command::Update(args) => cli::crud::update(&cli.global, args).await,
        Command::Delete(args) => cli::crud::delete(&cli.global, args).await,
        Command::Shell => cli::shell::run(&cli.global).await,
    }
}
