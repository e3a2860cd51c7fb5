//! Store error type definition

use thiserror::Error;

/// Store layer error type
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Persisted value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Storage key is not usable by the adapter
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

/// Store layer Result type alias
pub type StoreResult<T> = std::result::Result<T, StoreError>;
