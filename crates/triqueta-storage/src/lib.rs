//! Durable key/value storage and the credential store built on top of it.
//!
//! - [`KeyValueStorage`] is the storage port; [`FileStorage`] persists to a
//!   JSON file, [`MemoryStorage`] keeps everything in process.
//! - [`TokenStore`] is what the API client depends on: read the access and
//!   refresh tokens, replace both at once, clear both at once.

mod file;
mod keys;
mod memory;
mod tokens;
mod traits;

pub use file::FileStorage;
pub use keys::StorageKeys;
pub use memory::MemoryStorage;
pub use tokens::{CredentialStore, CredentialsPair, StoredTokens, TokenStore};
pub use traits::KeyValueStorage;

use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend-specific failure
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Encoding(e.to_string())
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
