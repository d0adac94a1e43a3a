//! Local filesystem blob store.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use drivebox_core::config::storage::StorageConfig;
use drivebox_core::error::{AppError, ErrorKind};
use drivebox_core::result::AppResult;
use drivebox_core::traits::blob::{BlobStore, StoredBlob};

/// Blob store backed by a directory on the local filesystem.
///
/// Keys are opaque relative paths under the configured data root; public
/// URLs are minted by joining the key onto the public base URL.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    /// Create a new local blob store, creating the data root if needed.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.data_root);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a blob key to an absolute path within the root.
    ///
    /// Keys are server-generated UUID-based names, but path separators and
    /// parent references are rejected anyway.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        if key.is_empty() || key.contains('/') || key.contains("..") || key.contains('\\') {
            return Err(AppError::storage(format!("Invalid blob key: {key}")));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn upload(&self, key: &str, data: Bytes) -> Result<StoredBlob, AppError> {
        let path = self.resolve(key)?;

        fs::write(&path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write blob: {key}"),
                e,
            )
        })?;

        debug!(key, bytes = data.len(), "Stored blob");
        Ok(StoredBlob {
            url: format!("{}/{}", self.public_base_url, key),
            public_id: key.to_string(),
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), AppError> {
        let path = self.resolve(public_id)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key = public_id, "Deleted blob");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete blob: {public_id}"),
                e,
            )),
        }
    }

    fn thumbnail_url(&self, public_id: &str) -> Option<String> {
        Some(format!("{}/thumb/{}", self.public_base_url, public_id))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        let meta = fs::metadata(&self.root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::DependencyUnavailable,
                "Storage root is not accessible",
                e,
            )
        })?;
        if !meta.is_dir() {
            return Err(AppError::dependency_unavailable(
                "Storage root is not a directory",
            ));
        }
        Ok(())
    }
}
