use dotenvy::dotenv;
use eyre::Result;
use std::path::PathBuf;

use streamwatch_core::config::Settings;

use super::Cli;

/// Load `.env` from the working directory when present.
pub fn load_env() -> Result<()> {
    dotenv().ok();
    Ok(())
}

/// Settings from the config file and environment, with CLI flags on top.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let settings = Settings::load(cli.config.as_deref())?;
    Ok(apply_overrides(settings, cli.registry.clone()))
}

fn apply_overrides(mut settings: Settings, registry: Option<PathBuf>) -> Settings {
    if let Some(path) = registry {
        settings.registry_path = path;
    }
    settings
}
