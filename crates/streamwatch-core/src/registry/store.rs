use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, warn};

use super::error::{RegistryError, Result};
use crate::utils::fs::write_atomic;

/// Durable storage for the ordered list of tracked channel names.
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// Read the stored names. Missing or unreadable storage yields an empty
    /// list; this never fails.
    async fn load(&self) -> Vec<String>;

    /// Overwrite the stored names with `names`, preserving order.
    async fn save(&self, names: &[String]) -> Result<()>;
}

/// A JSON array of strings in a single file, replaced atomically on save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RegistryStore for JsonFileStore {
    async fn load(&self) -> Vec<String> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "registry file not found, starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read registry, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&contents) {
            Ok(names) => names,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "registry file is corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    async fn save(&self, names: &[String]) -> Result<()> {
        let json = serde_json::to_string_pretty(names)?;
        write_atomic(&self.path, json.as_bytes())
            .await
            .map_err(|source| RegistryError::Io {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), count = names.len(), "registry saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[tokio::test]
    async fn save_then_load_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("streamers.json"));
        let expected = names(&["zoe", "alice", "Bob"]);

        store.save(&expected).await.unwrap();

        assert_eq!(store.load().await, expected);
    }

    #[tokio::test]
    async fn save_of_load_is_idempotent_even_with_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("streamers.json");
        std::fs::write(&path, r#"["a", "b", "a"]"#).unwrap();
        let store = JsonFileStore::new(&path);

        let first = store.load().await;
        store.save(&first).await.unwrap();

        assert_eq!(store.load().await, names(&["a", "b", "a"]));
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nope.json"));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("streamers.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(JsonFileStore::new(&path).load().await.is_empty());

        std::fs::write(&path, r#"[1, 2, 3]"#).unwrap();
        assert!(JsonFileStore::new(&path).load().await.is_empty());
    }

    #[tokio::test]
    async fn save_writes_a_pretty_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("streamers.json");
        JsonFileStore::new(&path)
            .save(&names(&["alice"]))
            .await
            .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "[\n  \"alice\"\n]");
    }

    #[tokio::test]
    async fn save_failure_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the rename fail
        let path = dir.path().join("taken");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("child"), "x").unwrap();

        let err = JsonFileStore::new(&path)
            .save(&names(&["alice"]))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Io { .. }));
    }
}
