//! The tracked-channel registry.
//!
//! Every mutation runs load → mutate → save while holding the registry's
//! write lock, so two tool calls in the same process cannot lose each
//! other's update. Name comparison is case-sensitive. Lookups of an
//! existing entry try the name as given first, then with surrounding
//! whitespace removed.

pub mod error;
pub mod store;

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub use error::{RegistryError, Result};
pub use store::{JsonFileStore, RegistryStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyExists,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
    /// The new name is already tracked under another entry; nothing changed.
    NameTaken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

pub struct Registry {
    store: Arc<dyn RegistryStore>,
    write_lock: Mutex<()>,
}

impl Registry {
    pub fn new(store: Arc<dyn RegistryStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(JsonFileStore::new(path)))
    }

    pub async fn list(&self) -> Vec<String> {
        self.store.load().await
    }

    pub async fn add(&self, name: &str) -> Result<AddOutcome> {
        let _guard = self.write_lock.lock().await;
        let mut names = self.store.load().await;

        if names.iter().any(|n| n == name) {
            return Ok(AddOutcome::AlreadyExists);
        }

        names.push(name.to_string());
        self.store.save(&names).await?;
        info!(streamer = name, "streamer added");
        Ok(AddOutcome::Added)
    }

    pub async fn update(&self, old_name: &str, new_name: &str) -> Result<UpdateOutcome> {
        let _guard = self.write_lock.lock().await;
        let mut names = self.store.load().await;

        let Some(index) = find(&names, old_name) else {
            return Ok(UpdateOutcome::NotFound);
        };

        if names[index] != new_name && names.iter().any(|n| n == new_name) {
            return Ok(UpdateOutcome::NameTaken);
        }

        names[index] = new_name.to_string();
        self.store.save(&names).await?;
        info!(from = old_name, to = new_name, "streamer renamed");
        Ok(UpdateOutcome::Updated)
    }

    pub async fn delete(&self, name: &str) -> Result<DeleteOutcome> {
        let _guard = self.write_lock.lock().await;
        let mut names = self.store.load().await;

        let Some(index) = find(&names, name) else {
            return Ok(DeleteOutcome::NotFound);
        };

        names.remove(index);
        self.store.save(&names).await?;
        info!(streamer = name, "streamer deleted");
        Ok(DeleteOutcome::Deleted)
    }
}

fn find(names: &[String], name: &str) -> Option<usize> {
    names.iter().position(|n| n == name).or_else(|| {
        let trimmed = name.trim();
        (trimmed != name)
            .then(|| names.iter().position(|n| n == trimmed))
            .flatten()
    })
}
