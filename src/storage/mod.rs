//! Client-local key/value persistence.
//!
//! Holds the small amount of state the dashboard keeps outside the team
//! directory: the module registry layout and the selected-team pointer.

mod file_store;
mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use crate::PaddockError;

/// Synchronous string key/value store.
///
/// Implementations provide different storage backends:
/// - [`MemoryStore`]: in-memory storage for tests and embedded use
/// - [`FileStore`]: one file per key inside a directory
pub trait LocalStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, PaddockError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), PaddockError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), PaddockError>;
}

impl<T: LocalStore + ?Sized> LocalStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, PaddockError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PaddockError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), PaddockError> {
        (**self).remove(key)
    }
}
