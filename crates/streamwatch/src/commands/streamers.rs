use async_trait::async_trait;
use eyre::{Result, eyre};
use std::io::Write;

use streamwatch_core::config::Settings;
use streamwatch_core::tools::StreamerTools;

use super::Command;
use crate::cli::StreamersCommands;

/// Runs the registry tools against the configured registry file.
pub struct StreamersCommand {
    pub settings: Settings,
    pub action: StreamersCommands,
}

#[async_trait]
impl Command for StreamersCommand {
    async fn execute(&self) -> Result<()> {
        let tools = StreamerTools::from_settings(&self.settings)?;

        let text = match &self.action {
            StreamersCommands::List => tools.list().await,
            StreamersCommands::Add { name } => tools.add(name).await,
            StreamersCommands::Remove { name } => tools.delete(name).await,
        }
        .map_err(|e| eyre!("{}", e))?;

        writeln!(std::io::stdout(), "{text}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamwatch_core::config::TwitchConfig;

    fn settings_in(dir: &tempfile::TempDir) -> Settings {
        Settings {
            registry_path: dir.path().join("streamers.json"),
            twitch: TwitchConfig::default(),
        }
    }

    #[tokio::test]
    async fn commands_share_the_registry_file() {
        let dir = tempfile::tempdir().unwrap();

        StreamersCommand {
            settings: settings_in(&dir),
            action: StreamersCommands::Add {
                name: "alice".to_string(),
            },
        }
        .execute()
        .await
        .unwrap();

        let raw = std::fs::read_to_string(dir.path().join("streamers.json")).unwrap();
        assert_eq!(raw, "[\n  \"alice\"\n]");

        StreamersCommand {
            settings: settings_in(&dir),
            action: StreamersCommands::Remove {
                name: "alice".to_string(),
            },
        }
        .execute()
        .await
        .unwrap();

        let raw = std::fs::read_to_string(dir.path().join("streamers.json")).unwrap();
        assert_eq!(raw, "[]");
    }

    #[tokio::test]
    async fn invalid_name_fails_the_command() {
        let dir = tempfile::tempdir().unwrap();
        let result = StreamersCommand {
            settings: settings_in(&dir),
            action: StreamersCommands::Add {
                name: "not valid".to_string(),
            },
        }
        .execute()
        .await;
        assert!(result.is_err());
        assert!(!dir.path().join("streamers.json").exists());
    }
}
