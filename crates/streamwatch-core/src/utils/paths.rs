use std::path::PathBuf;

/// Standardized application directories for streamwatch.
///
/// - User-level config: uses OS-specific dirs
/// - User-level data: uses OS-specific dirs
pub struct AppPaths;

impl AppPaths {
    /// Return the user-level config directory (platform-specific)
    pub fn user_config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "streamwatch").map(|d| d.config_dir().to_path_buf())
    }

    /// Return the user-level data directory (platform-specific)
    pub fn user_data_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "streamwatch").map(|d| d.data_dir().to_path_buf())
    }

    /// Return the user-level config file path: <config>/config.toml
    pub fn user_config_file() -> Option<PathBuf> {
        Self::user_config_dir().map(|d| d.join("config.toml"))
    }

    /// Default location of the registry file.
    ///
    /// Falls back to `./streamers.json` when no data directory can be resolved.
    pub fn default_registry() -> PathBuf {
        Self::user_data_dir()
            .map(|d| d.join("streamers.json"))
            .unwrap_or_else(|| PathBuf::from("streamers.json"))
    }

    pub fn log_dir() -> Option<PathBuf> {
        Self::user_data_dir().map(|d| d.join("logs"))
    }
}
