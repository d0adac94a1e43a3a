//! Share entity model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// How long a pending invitation stays redeemable.
pub const INVITATION_TTL_DAYS: i64 = 30;

/// Permission level granted by a share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "share_permission", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SharePermission {
    /// Read-only access.
    View,
    /// Read and modify access.
    Edit,
    /// Full control over the shared item.
    Admin,
}

/// Kind of item a share points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "share_item_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ShareItemType {
    /// A shared file.
    File,
    /// A shared folder.
    Folder,
}

/// The single item a share targets.
///
/// A share points at exactly one file or exactly one folder, never both
/// and never neither. The database stores this as an `item_type`
/// discriminant plus an `item_id` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "item_type", content = "item_id", rename_all = "snake_case")]
pub enum ShareTarget {
    /// A shared file.
    File(Uuid),
    /// A shared folder.
    Folder(Uuid),
}

impl ShareTarget {
    /// Database discriminant for this target.
    pub fn item_type(&self) -> ShareItemType {
        match self {
            Self::File(_) => ShareItemType::File,
            Self::Folder(_) => ShareItemType::Folder,
        }
    }

    /// Identifier of the targeted item.
    pub fn item_id(&self) -> Uuid {
        match self {
            Self::File(id) | Self::Folder(id) => *id,
        }
    }

    /// Reassemble a target from its stored columns.
    pub fn from_columns(item_type: ShareItemType, item_id: Uuid) -> Self {
        match item_type {
            ShareItemType::File => Self::File(item_id),
            ShareItemType::Folder => Self::Folder(item_id),
        }
    }
}

/// A share of a file or folder with another user, identified by email.
///
/// A share starts as a pending invitation carrying a redeemable token.
/// Accepting it clears the token and sets `accepted`; only accepted
/// shares grant access.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SharedItem {
    /// Unique share identifier.
    pub id: Uuid,
    /// Kind of item shared.
    pub item_type: ShareItemType,
    /// Identifier of the shared item.
    pub item_id: Uuid,
    /// The user who created the share.
    pub owner_id: Uuid,
    /// Email of the invited recipient (lowercased).
    pub shared_with_email: String,
    /// Permission level granted.
    pub permission: SharePermission,
    /// Invitation token; cleared once accepted.
    pub token: Option<String>,
    /// Whether the invitation has been accepted.
    pub accepted: bool,
    /// When the invitation stops being redeemable.
    pub expires_at: DateTime<Utc>,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
    /// When the share was last updated.
    pub updated_at: DateTime<Utc>,
}

impl SharedItem {
    /// The item this share targets.
    pub fn target(&self) -> ShareTarget {
        ShareTarget::from_columns(self.item_type, self.item_id)
    }

    /// Whether the invitation window has closed.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Expiry timestamp for an invitation created now.
    pub fn default_expiry() -> DateTime<Utc> {
        Utc::now() + Duration::days(INVITATION_TTL_DAYS)
    }
}

/// Data required to create a new share invitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSharedItem {
    /// The item to share.
    pub target: ShareTarget,
    /// The sharing user.
    pub owner_id: Uuid,
    /// Recipient email (lowercased).
    pub shared_with_email: String,
    /// Permission level to grant.
    pub permission: SharePermission,
    /// Invitation token.
    pub token: String,
    /// When the invitation expires.
    pub expires_at: DateTime<Utc>,
}
