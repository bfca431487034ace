use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Track Twitch streamers and check who is live, as an MCP tool server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, author)]
pub struct Cli {
    /// Path to a TOML config file (defaults to config.toml in the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the streamer registry JSON file
    #[arg(long, global = true, value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Write logs to stderr instead of the log file
    #[arg(long, global = true)]
    pub log_stderr: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the MCP server (default: stdio)
    Serve {
        /// Serve streamable HTTP on this address instead of stdio
        #[arg(long, value_name = "ADDR")]
        http: Option<SocketAddr>,
    },
    /// Check Twitch credentials
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Manage the streamer list
    Streamers {
        #[command(subcommand)]
        action: StreamersCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum AuthCommands {
    /// Exchange the client credentials for an app access token
    Check,
}

#[derive(Subcommand, Debug, Clone)]
pub enum StreamersCommands {
    /// Show every tracked streamer
    List,
    /// Start tracking a streamer
    Add { name: String },
    /// Stop tracking a streamer
    Remove { name: String },
}
