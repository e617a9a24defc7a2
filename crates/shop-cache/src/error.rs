//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the value would exceed the store's capacity.
    #[error("Quota exceeded: {needed} bytes needed, {available} available")]
    QuotaExceeded { needed: usize, available: usize },

    /// Storage has been disabled.
    #[error("Storage is disabled")]
    Disabled,

    /// Key is not usable by the backend.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),
}
