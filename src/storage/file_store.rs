//! File-backed local storage.
//!
//! Stores each key as a small file in a directory.

use std::path::PathBuf;

use super::LocalStore;
use crate::PaddockError;

/// File-backed key/value store.
///
/// Each key is stored as `{key}.json` in the configured directory, holding
/// the value as a JSON string.
///
/// # Example
///
/// ```rust,ignore
/// use paddock::storage::FileStore;
///
/// let store = FileStore::new("/var/lib/paddock/local")?;
/// ```
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    /// Creates a new file store, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, PaddockError> {
        let dir = directory.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            PaddockError::Storage(format!("Failed to create storage directory: {e}"))
        })?;
        Ok(Self { directory: dir })
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, PaddockError> {
        // keys become file names
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PaddockError::Storage(format!("Invalid storage key: {key:?}")));
        }
        Ok(self.directory.join(format!("{key}.json")))
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PaddockError> {
        let path = self.key_path(key)?;

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| PaddockError::Storage(format!("Failed to read {key}: {e}")))?;

        let value: String = serde_json::from_str(&content)
            .map_err(|e| PaddockError::Storage(format!("Failed to parse {key}: {e}")))?;

        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PaddockError> {
        let path = self.key_path(key)?;

        let content = serde_json::to_string(value)
            .map_err(|e| PaddockError::Storage(format!("Failed to serialize {key}: {e}")))?;

        std::fs::write(&path, content)
            .map_err(|e| PaddockError::Storage(format!("Failed to write {key}: {e}")))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PaddockError> {
        let path = self.key_path(key)?;

        if path.exists() {
            std::fs::remove_file(&path)
                .map_err(|e| PaddockError::Storage(format!("Failed to delete {key}: {e}")))?;
        }

        Ok(())
    }
}
