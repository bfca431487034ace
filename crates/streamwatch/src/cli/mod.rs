pub mod args;
pub mod config;

pub use args::{AuthCommands, Cli, Commands, StreamersCommands};
