//! Persisted credential pair and the store that owns it

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::StorageError;
use crate::storage::KeyValueStorage;

/// Storage key for the serialized credential pair.
///
/// Both tokens live under a single key so a reader can never observe
/// one of the two updated without the other.
const CREDENTIALS_KEY: &str = "credentials";

/// Access/refresh token pair issued by login or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer credential sent with each authenticated request
    pub access_token: String,
    /// Longer-lived credential exchanged for a new access token
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

/// Owns the persisted credential pair.
///
/// The HTTP client and refresh coordinator only touch tokens through
/// this store; neither caches a copy beyond a single request attempt.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Current credential pair, or `None` when nothing usable is stored.
    ///
    /// Read and parse failures degrade to absent rather than erroring;
    /// an unreadable session is indistinguishable from no session.
    pub async fn get(&self) -> Option<TokenPair> {
        let raw = match self.storage.get(CREDENTIALS_KEY).await {
            Ok(raw) => raw?,
            Err(err) => {
                warn!("failed to read stored credentials: {err}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(pair) => Some(pair),
            Err(err) => {
                warn!("stored credentials are corrupt, treating as absent: {err}");
                None
            }
        }
    }

    /// Persist both tokens.
    pub async fn set(&self, pair: &TokenPair) -> Result<(), StorageError> {
        let raw = serde_json::to_string(pair)?;
        self.storage.set(CREDENTIALS_KEY, &raw).await
    }

    /// Remove both tokens. Succeeds when nothing is stored.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(CREDENTIALS_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStorage, MemoryStorage};

    fn store() -> (Arc<MemoryStorage>, TokenStore) {
        let storage = Arc::new(MemoryStorage::new());
        (storage.clone(), TokenStore::new(storage))
    }

    #[tokio::test]
    async fn set_then_get_returns_pair_written() {
        let (_, store) = store();
        let pair = TokenPair::new("A1", "R1");
        store.set(&pair).await.unwrap();
        assert_eq!(store.get().await, Some(pair));
    }

    #[tokio::test]
    async fn clear_then_get_is_absent() {
        let (_, store) = store();
        store.set(&TokenPair::new("A1", "R1")).await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.get().await, None);
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let (_, store) = store();
        store.clear().await.unwrap();
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn corrupt_storage_reads_as_absent() {
        let (storage, store) = store();
        storage
            .set(super::CREDENTIALS_KEY, "not json")
            .await
            .unwrap();
        assert_eq!(store.get().await, None);
    }
}
