//! Key-value persistence trait
//!
//! History is stored as one opaque value under a single key. Implementations
//! only need last-write-wins semantics; no transactions are assumed.

use crate::domain::StoreError;

/// Durable key-value persistence used by the history store
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Returns
    ///
    /// `Ok(None)` if nothing has been written under the key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ReadFailed`] if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the value stored under `key` in full
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::WriteFailed`] if the value was not persisted.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
}
