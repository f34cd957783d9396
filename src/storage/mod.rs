//! Asynchronous key-value persistence.
//!
//! Values round-trip as arbitrary JSON documents. Stores catch every
//! [`StorageError`] and degrade; callers of store operations never see
//! persistence failures.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Persisted key for the ledger mapping.
pub const NUTRITION_DATA_KEY: &str = "nutritionData";
/// Persisted key for the history log.
pub const NUTRITION_HISTORY_KEY: &str = "nutritionHistory";
/// Persisted key for the favourites list.
pub const FAVOURITES_KEY: &str = "favourites";
/// Persisted key for the dark-mode flag.
pub const THEME_PREFERENCE_KEY: &str = "theme_preference";
/// Persisted key for the daily food note.
pub const FOOD_NOTES_KEY: &str = "foodNotes";

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O error reading or writing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Stored value is not valid JSON.
    #[error("failed to decode stored value for '{key}': {source}")]
    Decode {
        key: String,
        source: serde_json::Error,
    },
    /// Value could not be encoded as JSON.
    #[error("failed to encode value for '{key}': {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
    /// Key is empty or would escape the data directory.
    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),
}

/// Asynchronous key-value store consumed by all stores.
///
/// `load` returns `Ok(None)` when nothing has been saved under the key.
/// `keys` and `clear` exist for the admin inspection surface, which works
/// on this layer directly and bypasses the stores' in-memory caches.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn save(&self, key: &str, value: Value) -> Result<(), StorageError>;

    async fn load(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Every key currently persisted, sorted.
    async fn keys(&self) -> Result<Vec<String>, StorageError>;

    /// Destructive full wipe of every key.
    async fn clear(&self) -> Result<(), StorageError>;
}
