//! Key-value persistence used by the concept repository
//!
//! Values are opaque strings (JSON payloads in practice). Two backends:
//! - `FileStore`: one JSON file per key under a data directory
//! - `MemoryStore`: process-local map, used by tests and embedders

mod file_storage;
mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use file_storage::FileStore;
pub use memory::MemoryStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read '{key}' from store: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{key}' to store: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid store key: {0:?}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Asynchronous string key-value store.
///
/// `get` returns `Ok(None)` for a key that was never written; only real
/// failures surface as errors.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}

/// Keys map to file names, so they are limited to a safe alphabet.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("concepts").is_ok());
        assert!(validate_key("userName").is_ok());
        assert!(validate_key("user_name-2").is_ok());

        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a b").is_err());
        assert!(validate_key("notes.json").is_err());
    }
}
