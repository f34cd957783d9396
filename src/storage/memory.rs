//! In-memory storage for tests and ephemeral runs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::{Storage, StorageError};

/// [`Storage`] over a plain in-process map. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a key directly; test setup helper.
    pub async fn insert(&self, key: &str, value: Value) {
        self.entries.lock().await.insert(key.to_string(), value);
    }

    /// Reads a key directly, bypassing the trait; test assertion helper.
    pub async fn get(&self, key: &str) -> Option<Value> {
        self.entries.lock().await.get(key).cloned()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn save(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.entries.lock().await.keys().cloned().collect())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.entries.lock().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        storage.save("theme_preference", json!(true)).await.unwrap();

        assert_eq!(
            storage.load("theme_preference").await.unwrap(),
            Some(json!(true))
        );
        assert_eq!(storage.load("missing").await.unwrap(), None);
        assert_eq!(storage.keys().await.unwrap(), vec!["theme_preference"]);

        storage.clear().await.unwrap();
        assert!(storage.keys().await.unwrap().is_empty());
    }
}
