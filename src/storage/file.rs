//! Filesystem-backed storage, one JSON document per key.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;

use super::{Storage, StorageError};

/// [`Storage`] over a data directory, with each key stored as
/// `<data_dir>/<key>.json`. The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    data_dir: PathBuf,
}

impl FileStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.data_dir.join(format!("{}.json", key)))
    }
}

/// Keys become filenames; reject anything that could escape the data dir.
fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty()
        || key.contains('/')
        || key.contains('\\')
        || key.contains("..")
        || key.starts_with('.')
    {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[async_trait]
impl Storage for FileStorage {
    async fn save(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| StorageError::Io {
                path: self.data_dir.clone(),
                source: e,
            })?;

        let bytes = serde_json::to_vec_pretty(&value).map_err(|e| StorageError::Encode {
            key: key.to_string(),
            source: e,
        })?;

        fs::write(&path, bytes)
            .await
            .map_err(|e| StorageError::Io { path, source: e })?;

        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let path = self.path_for(key)?;

        match fs::read(&path).await {
            Ok(bytes) => {
                let value = serde_json::from_slice(&bytes).map_err(|e| StorageError::Decode {
                    key: key.to_string(),
                    source: e,
                })?;
                Ok(Some(value))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io { path, source: e }),
        }
    }

    async fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut entries = match fs::read_dir(&self.data_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::Io {
                    path: self.data_dir.clone(),
                    source: e,
                })
            }
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| StorageError::Io {
            path: self.data_dir.clone(),
            source: e,
        })? {
            let name = entry.file_name();
            if let Some(key) = name.to_string_lossy().strip_suffix(".json") {
                keys.push(key.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }

    async fn clear(&self) -> Result<(), StorageError> {
        for key in self.keys().await? {
            let path = self.data_dir.join(format!("{}.json", key));
            match fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(StorageError::Io { path, source: e }),
            }
        }
        Ok(())
    }
}
