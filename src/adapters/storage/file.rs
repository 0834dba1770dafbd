//! File-backed key-value store
//!
//! Each key maps to one file inside a data directory. Writes go to a
//! temporary sibling first and are moved into place with a rename, so a
//! crash mid-write leaves the previous value intact.

use super::traits::KeyValueStore;
use crate::domain::StoreError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key-value store that keeps one file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `data_dir`
    ///
    /// The directory is created lazily on first write.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory holding the stored files
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadFailed {
                key: key.to_string(),
                message: format!("{}: {}", path.display(), e),
            }),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let write_failed = |message: String| StoreError::WriteFailed {
            key: key.to_string(),
            message,
        };

        fs::create_dir_all(&self.data_dir).map_err(|e| {
            write_failed(format!(
                "failed to create {}: {}",
                self.data_dir.display(),
                e
            ))
        })?;

        let path = self.path_for(key);
        let tmp_path = self.data_dir.join(format!("{key}.json.tmp"));

        fs::write(&tmp_path, bytes)
            .map_err(|e| write_failed(format!("{}: {}", tmp_path.display(), e)))?;
        fs::rename(&tmp_path, &path)
            .map_err(|e| write_failed(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(key = key, bytes = bytes.len(), path = %path.display(), "Persisted value");
        Ok(())
    }
}
