//! String key-value storage backends.
//!
//! [`KeyValueStore`] has the same shape as browser local storage: string keys
//! mapped to string values, read and written whole. Backends:
//!
//! - [`MemoryStore`] - In-process map with an optional byte quota
//! - [`FileStore`] - JSON object file on disk

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend could not be read or written.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The backing file is not a JSON object of string values.
    #[error("storage file is malformed: {0}")]
    Malformed(#[source] serde_json::Error),
    /// The write would push the stored bytes past the configured quota.
    #[error("storage quota of {limit} bytes exceeded while writing {key:?}")]
    QuotaExceeded {
        /// Key that was being written.
        key: String,
        /// Configured quota in bytes.
        limit: usize,
    },
}

/// A string-keyed store of string values.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written or is full.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
