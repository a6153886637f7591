use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{validate_key, KeyValueStore, Result, StoreError};

/// File-backed store.
///
/// Directory structure:
/// ```text
/// {data_dir}/
/// ├── concepts.json    # value of the "concepts" key
/// ├── reminders.json   # value of the "reminders" key
/// └── userName.json    # value of the "userName" key
/// ```
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the file path for a key
    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let path = self.key_path(key);

        match fs::read_to_string(&path).await {
            Ok(content) => {
                log::debug!("Read {} bytes for key '{}' from {:?}", content.len(), key, path);
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        validate_key(key)?;
        let write_err = |source| StoreError::Write {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.base_path).await.map_err(write_err)?;

        // Write to a sibling temp file, then rename over the target so readers
        // never observe a half-written value.
        let path = self.key_path(key);
        let tmp_path = self.base_path.join(format!(".{}.json.tmp", key));
        fs::write(&tmp_path, value.as_bytes()).await.map_err(write_err)?;
        fs::rename(&tmp_path, &path).await.map_err(write_err)?;

        log::debug!("Wrote {} bytes for key '{}' to {:?}", value.len(), key, path);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        match fs::remove_file(self.key_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("data"));
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let (store, _temp) = create_test_store();
        assert_eq!(store.get("concepts").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_creates_directory_and_reads_back() {
        let (store, _temp) = create_test_store();

        store.set("userName", "\"Ada\"".to_string()).await.unwrap();

        assert!(store.base_path().join("userName.json").exists());
        assert_eq!(
            store.get("userName").await.unwrap().as_deref(),
            Some("\"Ada\"")
        );
    }

    #[tokio::test]
    async fn test_set_replaces_value_without_leftover_temp_file() {
        let (store, _temp) = create_test_store();

        store.set("concepts", "[]".to_string()).await.unwrap();
        store.set("concepts", "[1]".to_string()).await.unwrap();

        assert_eq!(store.get("concepts").await.unwrap().as_deref(), Some("[1]"));
        assert!(!store.base_path().join(".concepts.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_remove() {
        let (store, _temp) = create_test_store();

        store.set("concepts", "[]".to_string()).await.unwrap();
        store.remove("concepts").await.unwrap();
        assert_eq!(store.get("concepts").await.unwrap(), None);

        // Removing again is not an error
        store.remove("concepts").await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let (store, _temp) = create_test_store();

        let err = store.set("../escape", "x".to_string()).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_read_failure_is_reported() {
        let (store, _temp) = create_test_store();

        // A directory where the value file should be cannot be read as a string
        std::fs::create_dir_all(store.base_path().join("concepts.json")).unwrap();

        let err = store.get("concepts").await.unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }
}
