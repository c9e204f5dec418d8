use super::content_store::{file_exists, read_file, resolve_under, ContentStore, StorageError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Read-only access to the assets shipped with the application
/// (the streaming assets folder).
pub struct PackagedContentStore {
    root: PathBuf,
}

impl PackagedContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ContentStore for PackagedContentStore {
    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        let full_path = resolve_under(&self.root, path)?;
        file_exists(&full_path, path).await
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let full_path = resolve_under(&self.root, path)?;
        read_file(&full_path, path).await
    }

    fn scope(&self) -> &'static str {
        "packaged"
    }
}
