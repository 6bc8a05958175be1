//! In-memory local storage.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::LocalStore;
use crate::PaddockError;

/// In-memory key/value store.
///
/// Values are lost when the process exits. For state that must survive a
/// restart, use [`FileStore`](super::FileStore).
#[derive(Clone)]
pub struct MemoryStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            values: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.values.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PaddockError> {
        let values = self
            .values
            .read()
            .map_err(|_| PaddockError::Internal("lock poisoned".into()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PaddockError> {
        self.values
            .write()
            .map_err(|_| PaddockError::Internal("lock poisoned".into()))?
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PaddockError> {
        self.values
            .write()
            .map_err(|_| PaddockError::Internal("lock poisoned".into()))?
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("selectedTeamId", "team-1").unwrap();
        assert_eq!(store.get("selectedTeamId").unwrap().as_deref(), Some("team-1"));
        assert_eq!(store.len(), 1);

        store.set("selectedTeamId", "team-2").unwrap();
        assert_eq!(store.get("selectedTeamId").unwrap().as_deref(), Some("team-2"));

        store.remove("selectedTeamId").unwrap();
        assert!(store.get("selectedTeamId").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_missing_key() {
        let store = MemoryStore::new();
        assert!(store.remove("nothing").is_ok());
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", "v").unwrap();
        assert_eq!(other.get("k").unwrap().as_deref(), Some("v"));
    }
}
