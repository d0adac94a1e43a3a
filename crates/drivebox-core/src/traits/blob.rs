//! Blob storage abstraction.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::AppError;

/// Result of a successful blob upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Publicly reachable URL for the stored blob.
    pub url: String,
    /// Provider-scoped identifier used for later deletion.
    pub public_id: String,
}

/// Abstraction over a blob storage backend.
///
/// Implementations store raw file bytes and mint public URLs for them.
/// Metadata (names, folders, ownership) lives in the database; the blob
/// store only ever sees opaque keys and bytes.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Backend identifier, e.g. "local".
    fn provider_type(&self) -> &str;

    /// Store `data` under `key` and return its public URL and id.
    async fn upload(&self, key: &str, data: Bytes) -> Result<StoredBlob, AppError>;

    /// Delete the blob identified by `public_id`.
    ///
    /// Deleting a blob that does not exist is not an error.
    async fn delete(&self, public_id: &str) -> Result<(), AppError>;

    /// Return a thumbnail URL for the blob, if the backend can derive one.
    fn thumbnail_url(&self, public_id: &str) -> Option<String>;

    /// Verify the backend is reachable and writable.
    async fn health_check(&self) -> Result<(), AppError>;
}
