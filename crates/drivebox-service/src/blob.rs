//! Timeout-guarded access to the blob store.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::warn;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::traits::blob::{BlobStore, StoredBlob};

/// Wraps the configured [`BlobStore`] and bounds every call with a
/// timeout so a stuck backend can't hang request handlers.
#[derive(Clone)]
pub struct BlobClient {
    store: Arc<dyn BlobStore>,
    timeout: Duration,
}

impl std::fmt::Debug for BlobClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobClient")
            .field("provider", &self.store.provider_type())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl BlobClient {
    /// Creates a new client around the given store.
    pub fn new(store: Arc<dyn BlobStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Store `data` under `key`.
    pub async fn upload(&self, key: &str, data: Bytes) -> AppResult<StoredBlob> {
        tokio::time::timeout(self.timeout, self.store.upload(key, data))
            .await
            .map_err(|_| AppError::dependency_unavailable("Blob store timed out during upload"))?
    }

    /// Delete the blob identified by `public_id`.
    pub async fn delete(&self, public_id: &str) -> AppResult<()> {
        tokio::time::timeout(self.timeout, self.store.delete(public_id))
            .await
            .map_err(|_| AppError::dependency_unavailable("Blob store timed out during delete"))?
    }

    /// Delete a blob without failing the caller.
    ///
    /// Purge flows must not leave database rows behind because a blob
    /// backend hiccupped; an orphaned blob is recoverable, a dangling row
    /// is not.
    pub async fn delete_best_effort(&self, public_id: &str) {
        if let Err(e) = self.delete(public_id).await {
            warn!(public_id, error = %e, "Failed to delete blob; leaving orphan");
        }
    }

    /// Thumbnail URL for a stored blob, if the backend supports one.
    pub fn thumbnail_url(&self, public_id: &str) -> Option<String> {
        self.store.thumbnail_url(public_id)
    }

    /// Verify the backend is reachable.
    pub async fn health_check(&self) -> AppResult<()> {
        tokio::time::timeout(self.timeout, self.store.health_check())
            .await
            .map_err(|_| AppError::dependency_unavailable("Blob store health check timed out"))?
    }
}
