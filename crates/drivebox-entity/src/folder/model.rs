//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A folder in a user's tree.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// The folder owner.
    pub owner_id: Uuid,
    /// Parent folder ID (null only for the root folder).
    pub parent_id: Option<Uuid>,
    /// Whether this is the user's root folder.
    pub is_root: bool,
    /// Whether the folder is starred.
    pub is_starred: bool,
    /// Whether the folder is in the trash.
    pub is_trash: bool,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// The folder owner.
    pub owner_id: Uuid,
    /// Parent folder (None only when creating a root folder).
    pub parent_id: Option<Uuid>,
    /// Whether this is a root folder.
    pub is_root: bool,
}

/// A single entry in a folder's breadcrumb trail, ordered root-first.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Breadcrumb {
    /// Folder identifier.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
}
