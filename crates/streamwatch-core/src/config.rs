//! Runtime settings: built-in defaults, an optional TOML file, then
//! environment variables. CLI flags are applied by the binary on top.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::utils::paths::AppPaths;

pub const DEFAULT_AUTH_URL: &str = "https://id.twitch.tv/oauth2/token";
pub const DEFAULT_API_BASE_URL: &str = "https://api.twitch.tv/helix";
pub const DEFAULT_WEB_BASE_URL: &str = "https://www.twitch.tv";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const CLIENT_ID_ENV: &str = "TWITCH_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "TWITCH_CLIENT_SECRET";
pub const REGISTRY_ENV: &str = "STREAMWATCH_REGISTRY";

/// A string that never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

#[derive(Debug, Clone)]
pub struct TwitchConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<Secret>,
    pub auth_url: String,
    pub api_base_url: String,
    pub web_base_url: String,
    pub request_timeout: Duration,
}

impl Default for TwitchConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            auth_url: DEFAULT_AUTH_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            web_base_url: DEFAULT_WEB_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl TwitchConfig {
    /// Point every endpoint at one base URL. Used against mock servers.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            auth_url: format!("{base}/oauth2/token"),
            api_base_url: format!("{base}/helix"),
            web_base_url: base.to_string(),
            ..Self::default()
        }
    }

    pub fn with_credentials(mut self, client_id: &str, client_secret: &str) -> Self {
        self.client_id = Some(client_id.to_string());
        self.client_secret = Some(Secret::new(client_secret));
        self
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub registry_path: PathBuf,
    pub twitch: TwitchConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry_path: AppPaths::default_registry(),
            twitch: TwitchConfig::default(),
        }
    }
}

/// On-disk shape of `config.toml`. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    pub registry_path: Option<PathBuf>,
    #[serde(default)]
    pub twitch: TwitchSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TwitchSection {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub auth_url: Option<String>,
    pub api_base_url: Option<String>,
    pub web_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Settings {
    /// Load settings from `config_path` (or the user config file when it
    /// exists) and the process environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let file = match config_path {
            Some(path) => Some(read_settings_file(path)?),
            None => match AppPaths::user_config_file() {
                Some(path) if path.exists() => Some(read_settings_file(&path)?),
                _ => None,
            },
        };

        Ok(Self::from_parts(file.unwrap_or_default(), |key| {
            std::env::var(key).ok()
        }))
    }

    pub fn from_parts<F>(file: SettingsFile, get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| {
            get_env(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = TwitchConfig::default();
        let section = file.twitch;

        let twitch = TwitchConfig {
            client_id: env(CLIENT_ID_ENV).or(section.client_id),
            client_secret: env(CLIENT_SECRET_ENV)
                .or(section.client_secret)
                .map(Secret::new),
            auth_url: section.auth_url.unwrap_or(defaults.auth_url),
            api_base_url: section.api_base_url.unwrap_or(defaults.api_base_url),
            web_base_url: section.web_base_url.unwrap_or(defaults.web_base_url),
            request_timeout: section
                .request_timeout_secs
                .map_or(defaults.request_timeout, Duration::from_secs),
        };

        let registry_path = env(REGISTRY_ENV)
            .map(PathBuf::from)
            .or(file.registry_path)
            .unwrap_or_else(AppPaths::default_registry);

        Self {
            registry_path,
            twitch,
        }
    }
}

fn read_settings_file(path: &Path) -> Result<SettingsFile> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Error::Configuration(format!("Failed to read {}: {e}", path.display()))
    })?;
    toml::from_str(&contents)
        .map_err(|e| Error::Configuration(format!("Failed to parse {}: {e}", path.display())))
}
