use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::ServiceError;

/// Opaque blob store the invoice upload writes through. The portal only
/// needs `put`; retrieval is served elsewhere (static file hosting for the
/// local variant).
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Stores `bytes` under `name` and returns the stored file's URL.
    async fn put(&self, name: &str, bytes: &[u8]) -> Result<String, ServiceError>;
}

/// Local-filesystem store writing under a configured root directory.
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn put(&self, name: &str, bytes: &[u8]) -> Result<String, ServiceError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| ServiceError::StorageError(format!("create upload dir: {}", e)))?;

        let path = self.root.join(name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ServiceError::StorageError(format!("write {}: {}", path.display(), e)))?;

        debug!(file = %path.display(), size = bytes.len(), "stored uploaded file");
        Ok(format!("/uploads/{}", name))
    }
}

/// In-memory store used by tests.
#[derive(Default)]
pub struct InMemoryFileStore {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.lock().expect("file store lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.lock().expect("file store lock").contains_key(name)
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn put(&self, name: &str, bytes: &[u8]) -> Result<String, ServiceError> {
        self.files
            .lock()
            .expect("file store lock")
            .insert(name.to_string(), bytes.to_vec());
        Ok(format!("/uploads/{}", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn local_store_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());

        let url = store.put("invoice.pdf", b"%PDF-1.4").await.unwrap();
        assert_eq!(url, "/uploads/invoice.pdf");

        let written = std::fs::read(dir.path().join("invoice.pdf")).unwrap();
        assert_eq!(written, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn in_memory_store_tracks_files() {
        let store = InMemoryFileStore::new();
        assert!(store.is_empty());

        store.put("a.pdf", b"x").await.unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.contains("a.pdf"));
    }
}
