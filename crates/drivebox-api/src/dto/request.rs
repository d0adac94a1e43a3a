//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use drivebox_entity::share::model::{ShareItemType, SharePermission};

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Update profile request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
}

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Folder name is required"))]
    pub name: String,
    /// Parent folder ID (omit for the root folder).
    pub parent_id: Option<Uuid>,
}

/// Flag operation applied through PATCH on a folder or file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemOperation {
    /// Mark the item starred.
    Star,
    /// Clear the starred flag.
    Unstar,
    /// Bring the item back from the trash.
    Restore,
}

/// Update request shared by folders and files.
///
/// Exactly one of `operation`, `name`, or `parent_id` drives the update;
/// `parent_id` only applies to folders.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateItemRequest {
    /// Flag operation to apply.
    pub operation: Option<ItemOperation>,
    /// New name (rename).
    pub name: Option<String>,
    /// New parent folder (move).
    pub parent_id: Option<Uuid>,
}

/// Field update applied through PUT on a file.
///
/// Fields also accept their camelCase spellings; API clients written
/// against the original service send those.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateFileBody {
    /// New name.
    pub name: Option<String>,
    /// New starred flag.
    #[serde(alias = "isStarred")]
    pub is_starred: Option<bool>,
}

/// Field update applied through PUT on a folder.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateFolderBody {
    /// New name.
    pub name: Option<String>,
    /// New parent folder.
    #[serde(alias = "parentId")]
    pub parent_id: Option<Uuid>,
    /// New starred flag.
    #[serde(alias = "isStarred")]
    pub is_starred: Option<bool>,
}

/// Listing filter for folders and files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListParams {
    /// Parent folder (folders) or containing folder (files).
    #[serde(alias = "parentId")]
    pub parent_id: Option<Uuid>,
    /// Containing folder, alias used by the file listing.
    #[serde(alias = "folderId")]
    pub folder_id: Option<Uuid>,
    /// Only return starred items.
    #[serde(default)]
    pub starred: bool,
    /// List trashed items instead of live ones.
    #[serde(alias = "isTrash")]
    pub is_trash: Option<bool>,
}

/// Delete mode for files and folders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct DeleteParams {
    /// Skip the trash and purge immediately.
    #[serde(default)]
    pub permanent: bool,
}

/// Create share request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateShareBody {
    /// Kind of item being shared.
    pub item_type: ShareItemType,
    /// Identifier of the item.
    pub item_id: Uuid,
    /// Recipient email.
    #[validate(email(message = "A valid recipient email is required"))]
    pub email: String,
    /// Permission level (defaults to view).
    #[serde(default = "default_permission")]
    pub permission: SharePermission,
}

fn default_permission() -> SharePermission {
    SharePermission::View
}

/// Permission change applied through PUT on a share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateShareBody {
    /// New permission level.
    pub permission: SharePermission,
}

/// Share listing filter: scope the list to one file or folder.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ShareListParams {
    /// List shares of this file.
    #[serde(alias = "fileId")]
    pub file_id: Option<Uuid>,
    /// List shares of this folder.
    #[serde(alias = "folderId")]
    pub folder_id: Option<Uuid>,
}

/// Search query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Name fragment to search for.
    pub q: String,
}
