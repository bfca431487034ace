use clap::Parser;
use eyre::Result;
use std::io::Write;

use streamwatch::cli::{Cli, Commands};
use streamwatch::commands::{
    Command, auth::AuthCommand, serve::ServeCommand, streamers::StreamersCommand,
};
use streamwatch_core::utils::tracing::{LogTarget, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre for better error reports
    color_eyre::install()?;

    let cli = Cli::parse();

    // Load .env file if it exists
    streamwatch::cli::config::load_env()?;

    // Stdout carries MCP frames, so logs go to a file unless asked otherwise
    let target = if cli.log_stderr {
        LogTarget::Stderr
    } else {
        LogTarget::File
    };
    if init_tracing(target)?.is_none() && !cli.log_stderr {
        writeln!(
            std::io::stderr(),
            "No data directory available; logging to stderr"
        )?;
    }

    let settings = streamwatch::cli::config::load_settings(&cli)?;
    tracing::debug!(?settings, "settings loaded");

    let cmd = cli.command.clone().unwrap_or(Commands::Serve { http: None });

    match cmd {
        Commands::Serve { http } => ServeCommand { settings, http }.execute().await,
        Commands::Auth { action } => AuthCommand { settings, action }.execute().await,
        Commands::Streamers { action } => StreamersCommand { settings, action }.execute().await,
    }
}
