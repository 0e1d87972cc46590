//! Object storage for uploaded media.
//!
//! All media lives in a single bucket addressed by relative keys such as
//! `42/1700000000000-ab12cd34.jpg`. [`LocalStorage`] keeps objects on disk and
//! serves them under a public base URL; [`MemoryStorage`] keeps them in a map.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

/// Errors raised by an [`ObjectStorage`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single-bucket object store.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `key`, replacing any existing object.
    async fn upload(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StorageError>;

    /// Public URL visitors use to fetch the object at `key`.
    fn public_url(&self, key: &str) -> String;

    /// Delete the object at `key`.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Reject keys that are empty, absolute, or escape the bucket root.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let path = Path::new(key);
    let well_formed = !key.is_empty()
        && !key.contains('\\')
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if well_formed {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

fn join_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key.trim_start_matches('/'))
}

// ---------------------------------------------------------------------------
// Local filesystem
// ---------------------------------------------------------------------------

/// Filesystem-backed storage rooted at `root`, served at `public_base_url`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn upload(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StorageError> {
        let dest = self.resolve(key)?;
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&dest, bytes).await?;
        tracing::debug!(key, content_type, size = bytes.len(), "Stored object");
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        join_url(&self.public_base_url, key)
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.resolve(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// A stored object held by [`MemoryStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Map-backed storage for tests and local experiments.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, StoredObject>>,
    fail_uploads: Mutex<Vec<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make uploads whose key contains `fragment` fail with an I/O error.
    pub fn fail_uploads_matching(&self, fragment: impl Into<String>) {
        self.fail_uploads
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(fragment.into());
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let should_fail = self
            .fail_uploads
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|fragment| key.contains(fragment.as_str()));
        if should_fail {
            return Err(StorageError::Io(std::io::Error::other("simulated upload failure")));
        }

        self.objects.lock().unwrap_or_else(|e| e.into_inner()).insert(
            key.to_string(),
            StoredObject {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        join_url("memory://media", key)
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.objects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn key_validation() {
        assert!(validate_key("1/123-abc.jpg").is_ok());
        assert_matches!(validate_key(""), Err(StorageError::InvalidKey(_)));
        assert_matches!(validate_key("../etc/passwd"), Err(StorageError::InvalidKey(_)));
        assert_matches!(validate_key("/abs/path.jpg"), Err(StorageError::InvalidKey(_)));
        assert_matches!(validate_key("./x.jpg"), Err(StorageError::InvalidKey(_)));
        assert_matches!(validate_key("a\\b.jpg"), Err(StorageError::InvalidKey(_)));
    }

    #[test]
    fn public_url_joins_cleanly() {
        let storage = LocalStorage::new("/tmp/media", "http://localhost:3000/media/");
        assert_eq!(
            storage.public_url("7/1-a.jpg"),
            "http://localhost:3000/media/7/1-a.jpg"
        );
    }

    #[tokio::test]
    async fn local_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "/media");

        storage
            .upload("3/100-abc.png", b"png-bytes", "image/png")
            .await
            .unwrap();
        let on_disk = tokio::fs::read(dir.path().join("3/100-abc.png")).await.unwrap();
        assert_eq!(on_disk, b"png-bytes");

        storage.remove("3/100-abc.png").await.unwrap();
        assert_matches!(
            storage.remove("3/100-abc.png").await,
            Err(StorageError::NotFound(_))
        );
    }

    #[tokio::test]
    async fn local_rejects_escaping_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "/media");
        assert_matches!(
            storage.upload("../outside.jpg", b"x", "image/jpeg").await,
            Err(StorageError::InvalidKey(_))
        );
    }

    #[tokio::test]
    async fn memory_storage_simulated_failures() {
        let storage = MemoryStorage::new();
        storage.fail_uploads_matching("broken");

        storage.upload("1/ok.jpg", b"ok", "image/jpeg").await.unwrap();
        assert_matches!(
            storage.upload("1/broken.jpg", b"x", "image/jpeg").await,
            Err(StorageError::Io(_))
        );
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get("1/ok.jpg").unwrap().content_type, "image/jpeg");
    }
}
