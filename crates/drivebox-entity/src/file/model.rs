//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored file. The bytes live in the blob store; this row holds
/// everything else.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// Original file name, including extension.
    pub name: String,
    /// MIME type reported at upload.
    pub mime_type: String,
    /// Size in bytes.
    pub size: i64,
    /// Public URL of the stored blob.
    pub url: String,
    /// Thumbnail URL, present for previewable types.
    pub thumbnail_url: Option<String>,
    /// Blob-store identifier used for deletion.
    pub public_id: String,
    /// The file owner.
    pub owner_id: Uuid,
    /// Containing folder; always set for rows the services create.
    pub folder_id: Option<Uuid>,
    /// Whether the file is starred.
    pub is_starred: bool,
    /// Whether the file is in the trash.
    pub is_trash: bool,
    /// Last time the file was opened by its owner.
    pub viewed_at: Option<DateTime<Utc>>,
    /// When the file was uploaded.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Whether a MIME type gets a derived thumbnail.
    pub fn thumbnail_eligible(mime_type: &str) -> bool {
        mime_type.starts_with("image/") || mime_type == "application/pdf"
    }
}

/// Data required to record a newly uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// Original file name.
    pub name: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub size: i64,
    /// Public blob URL.
    pub url: String,
    /// Thumbnail URL.
    pub thumbnail_url: Option<String>,
    /// Blob-store identifier.
    pub public_id: String,
    /// The file owner.
    pub owner_id: Uuid,
    /// Containing folder.
    pub folder_id: Option<Uuid>,
}
