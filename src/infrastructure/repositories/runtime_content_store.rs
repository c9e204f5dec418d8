use super::content_store::{file_exists, read_file, resolve_under, ContentStore, StorageError};
use async_trait::async_trait;
use std::path::PathBuf;

/// Runtime file manager.
///
/// Entries in the writable persistent-data directory take precedence;
/// anything not found there is looked up in the packaged streaming assets.
pub struct RuntimeContentStore {
    persistent_data_root: PathBuf,
    streaming_assets_root: PathBuf,
}

impl RuntimeContentStore {
    pub fn new(
        persistent_data_root: impl Into<PathBuf>,
        streaming_assets_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            persistent_data_root: persistent_data_root.into(),
            streaming_assets_root: streaming_assets_root.into(),
        }
    }
}

#[async_trait]
impl ContentStore for RuntimeContentStore {
    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        let persistent = resolve_under(&self.persistent_data_root, path)?;
        if file_exists(&persistent, path).await? {
            return Ok(true);
        }

        let packaged = resolve_under(&self.streaming_assets_root, path)?;
        file_exists(&packaged, path).await
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let persistent = resolve_under(&self.persistent_data_root, path)?;
        if file_exists(&persistent, path).await? {
            tracing::debug!(path = %path, "Reading from persistent data");
            return read_file(&persistent, path).await;
        }

        let packaged = resolve_under(&self.streaming_assets_root, path)?;
        read_file(&packaged, path).await
    }

    fn scope(&self) -> &'static str {
        "runtime"
    }
}
