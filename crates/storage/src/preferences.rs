//! Preference storage backends
//!
//! Settings such as the theme preference are read and written through the
//! [`PreferenceStorage`] trait. The durable backend is [`KvStore`]; when it
//! cannot be opened, [`open_preference_storage`] hands out a [`MemoryStorage`]
//! instead so callers never deal with a missing backend.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::kv::{KvConfig, KvStore, Result};

/// Minimal string key-value interface for persisted preferences
#[async_trait]
pub trait PreferenceStorage: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`, returning whether a value was present
    async fn remove(&self, key: &str) -> Result<bool>;

    /// Whether values written here survive a restart
    fn is_durable(&self) -> bool {
        true
    }
}

#[async_trait]
impl PreferenceStorage for KvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.get_string(key)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_string(key, value)?;
        self.flush().await
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let removed = KvStore::remove(self, key)?;
        self.flush().await?;
        Ok(removed)
    }
}

/// In-memory preference storage
///
/// Used when no durable backend is available. Values live for the
/// lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.values.write().await.remove(key).is_some())
    }

    fn is_durable(&self) -> bool {
        false
    }
}

/// Open the durable preference backend, falling back to memory
///
/// Failure to open the sled database is logged and degrades to
/// [`MemoryStorage`]; preferences then last for the current session only.
pub fn open_preference_storage(config: KvConfig) -> Arc<dyn PreferenceStorage> {
    let path = config.path.clone();
    match KvStore::new(config) {
        Ok(kv) => Arc::new(kv),
        Err(e) => {
            tracing::warn!(
                path = %path,
                "Preference storage unavailable, preferences will not persist: {}",
                e
            );
            Arc::new(MemoryStorage::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();

        assert_eq!(storage.get("device:themeMode").await.unwrap(), None);

        storage.set("device:themeMode", "dark").await.unwrap();
        assert_eq!(
            storage.get("device:themeMode").await.unwrap(),
            Some("dark".to_string())
        );

        assert!(storage.remove("device:themeMode").await.unwrap());
        assert!(!storage.remove("device:themeMode").await.unwrap());
        assert_eq!(storage.get("device:themeMode").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_storage_is_not_durable() {
        assert!(!MemoryStorage::new().is_durable());
    }

    #[tokio::test]
    async fn test_kv_store_as_preference_storage() {
        let storage: Arc<dyn PreferenceStorage> = Arc::new(KvStore::in_memory().unwrap());

        storage.set("device:themeMode", "light").await.unwrap();
        assert_eq!(
            storage.get("device:themeMode").await.unwrap(),
            Some("light".to_string())
        );
        assert!(storage.is_durable());
        assert!(storage.remove("device:themeMode").await.unwrap());
    }

    #[tokio::test]
    async fn test_open_falls_back_to_memory() {
        let dir = tempfile::TempDir::new().unwrap();
        // A regular file where sled expects a directory cannot be opened
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"occupied").unwrap();
        let path = blocker.join("kv").to_string_lossy().to_string();

        let storage = open_preference_storage(KvConfig::new(path));
        assert!(!storage.is_durable());

        storage.set("device:themeMode", "dark").await.unwrap();
        assert_eq!(
            storage.get("device:themeMode").await.unwrap(),
            Some("dark".to_string())
        );
    }

    #[tokio::test]
    async fn test_open_uses_durable_backend() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("kv").to_string_lossy().to_string();

        let storage = open_preference_storage(KvConfig::new(path).flush_every_ms(None));
        assert!(storage.is_durable());
    }
}
