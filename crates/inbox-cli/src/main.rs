mod cli;
mod commands;
mod render;
mod state;

use clap::Parser;
use cli::{Cli, CliCommand};
use state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let state = AppState::initialize(cli.user.as_deref(), cli.api_base.as_deref())?;

    match cli.command {
        CliCommand::Tasks(command) => commands::tasks(&state, command).await,
        CliCommand::Spam(command) => commands::spam(&state, command).await,
        CliCommand::Settings(command) => commands::settings(&state, command).await,
        CliCommand::Admin(command) => commands::admin(&state, command).await,
        CliCommand::User(command) => commands::user(&state, command),
    }
}
