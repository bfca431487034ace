pub mod cli;
pub mod commands;
pub mod mcp;

pub use streamwatch_core::{config, registry, status, tools};
