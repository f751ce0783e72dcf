//! Durable key-value persistence backing the token store
//!
//! The SDK talks to storage through the [`KeyValueStorage`] trait so
//! the token store stays independent of where credentials actually
//! live. [`FileStorage`] is the production backing; [`MemoryStorage`]
//! serves tests and throwaway sessions.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use etcetera::{choose_base_strategy, BaseStrategy};
use tokio::sync::Mutex;

use crate::error::StorageError;

/// Generic async key-value storage addressed by string key
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read a value; `None` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value; succeeds when the key is already absent.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// File-per-key storage rooted at a directory.
///
/// Writes land in a temporary sibling first and are renamed into
/// place, so a concurrent reader observes either the previous value or
/// the new one, never a partial write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage rooted at the platform data directory
    /// (e.g. `~/.local/share/weedguard` on Linux).
    pub fn in_data_dir() -> Result<Self, StorageError> {
        let strategy = choose_base_strategy().map_err(|e| {
            StorageError::Unavailable(format!("failed to determine base directories: {e}"))
        })?;
        Ok(Self::new(
            strategy
                .data_dir()
                .join(weedguard_common::STORAGE_DIR_NAME),
        ))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are dotted identifiers; keep them filesystem-safe.
        let file: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(file)
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io(err)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(
            ".{}.tmp",
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| key.to_string())
        ));
        tokio::fs::write(&tmp, value).await?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600)).await?;
        }
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io(err)),
        }
    }
}

/// In-memory storage for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
