//! Error types for durable storage.
//!
//! Validation failures and unknown ids are not errors in this crate: the
//! store reports them through its return values and leaves state untouched.

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`](crate::persist::KeyValueStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Key cannot be mapped onto the backend
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Errors raised while saving or loading the task collection.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backend refused the read or write
    #[error(transparent)]
    Store(#[from] StoreError),

    /// JSON encoding or decoding failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
