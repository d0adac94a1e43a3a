//! Upload request types and size limits.

use bytes::Bytes;
use uuid::Uuid;

use drivebox_core::config::storage::StorageConfig;

/// A file upload ready for processing.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Original file name, including extension.
    pub name: String,
    /// MIME type reported by the client.
    pub mime_type: String,
    /// Raw file bytes.
    pub data: Bytes,
    /// Destination folder (None means the user's root folder).
    pub folder_id: Option<Uuid>,
}

/// Size limits applied to uploads.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    /// Maximum size of a single file in bytes.
    pub max_file_size: i64,
    /// Aggregate per-user quota in bytes.
    pub user_quota: i64,
}

impl From<&StorageConfig> for UploadLimits {
    fn from(config: &StorageConfig) -> Self {
        Self {
            max_file_size: config.max_upload_size_bytes as i64,
            user_quota: config.user_quota_bytes as i64,
        }
    }
}

/// Derive a unique blob key for an upload, preserving the extension so
/// the serving layer can infer content types.
pub(crate) fn blob_key_for(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() && !ext.contains('/') => {
            format!("{}.{}", Uuid::new_v4(), ext.to_lowercase())
        }
        _ => Uuid::new_v4().to_string(),
    }
}
