//! Storage error types.

use thiserror::Error;

/// Errors that can occur when talking to a key-value backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to serialize or deserialize a slot.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Backend I/O failure.
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backend rejected the operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),

    /// Key contains characters the backend cannot address.
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}
