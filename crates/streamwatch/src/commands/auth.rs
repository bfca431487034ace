use async_trait::async_trait;
use eyre::{Result, eyre};
use std::io::Write;

use streamwatch_core::config::Settings;
use streamwatch_core::status::StatusResolver;

use super::Command;
use crate::cli::AuthCommands;

pub struct AuthCommand {
    pub settings: Settings,
    pub action: AuthCommands,
}

#[async_trait]
impl Command for AuthCommand {
    async fn execute(&self) -> Result<()> {
        match self.action {
            AuthCommands::Check => {
                let resolver = StatusResolver::new(&self.settings.twitch)?;
                let token = resolver
                    .credentials()
                    .get_credential()
                    .await
                    .map_err(|e| eyre!("Credential check failed: {}", e))?;

                let mut stdout = std::io::stdout();
                writeln!(stdout, "Obtained app access token {}", token.masked())?;
                if let Some(secs) = token.expires_in() {
                    writeln!(stdout, "Expires in {} hours", secs / 3600)?;
                }
                Ok(())
            }
        }
    }
}
