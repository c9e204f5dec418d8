use crate::infrastructure::runtime::RuntimeContext;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid content path '{0}'")]
    InvalidPath(String),
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Read access to cached content, addressed by paths relative to a content root.
///
/// Implementations must report a missing entry as `Ok(false)` from `exists`;
/// every other failure is a [`StorageError`] so that I/O faults are never
/// mistaken for cache misses.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Check whether an entry exists at `path`
    async fn exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Read the full contents of the entry at `path`
    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Name of the store that answers the next call.
    ///
    /// Anything derived from store contents must be keyed by this, since a
    /// composite store can route the same path to different content.
    fn scope(&self) -> &'static str;
}

/// Routes each call to the runtime or the packaged store, depending on the
/// runtime state at the moment of the call.
pub struct ContentStoreSelector {
    context: Arc<RuntimeContext>,
    runtime: Arc<dyn ContentStore>,
    packaged: Arc<dyn ContentStore>,
}

impl ContentStoreSelector {
    pub fn new(
        context: Arc<RuntimeContext>,
        runtime: Arc<dyn ContentStore>,
        packaged: Arc<dyn ContentStore>,
    ) -> Self {
        Self {
            context,
            runtime,
            packaged,
        }
    }

    fn current(&self) -> &dyn ContentStore {
        if self.context.is_playing() {
            self.runtime.as_ref()
        } else {
            self.packaged.as_ref()
        }
    }
}

#[async_trait]
impl ContentStore for ContentStoreSelector {
    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        self.current().exists(path).await
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        self.current().read(path).await
    }

    fn scope(&self) -> &'static str {
        self.current().scope()
    }
}

/// Join a relative content path onto `root`, refusing anything that could
/// leave the root.
pub(crate) fn resolve_under(root: &Path, relative: &str) -> Result<PathBuf, StorageError> {
    let relative_path = Path::new(relative);
    let escapes = relative_path
        .components()
        .any(|component| !matches!(component, Component::Normal(_)));

    if relative.is_empty() || escapes {
        return Err(StorageError::InvalidPath(relative.to_string()));
    }

    Ok(root.join(relative_path))
}

pub(crate) async fn file_exists(full_path: &Path, relative: &str) -> Result<bool, StorageError> {
    match tokio::fs::metadata(full_path).await {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StorageError::Io {
            path: relative.to_string(),
            source: e,
        }),
    }
}

pub(crate) async fn read_file(full_path: &Path, relative: &str) -> Result<Vec<u8>, StorageError> {
    tokio::fs::read(full_path)
        .await
        .map_err(|e| StorageError::Io {
            path: relative.to_string(),
            source: e,
        })
}
