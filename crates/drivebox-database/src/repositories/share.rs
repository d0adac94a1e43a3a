//! Share repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use drivebox_core::error::{AppError, ErrorKind};
use drivebox_core::result::AppResult;
use drivebox_entity::share::model::{CreateSharedItem, ShareItemType, SharePermission, SharedItem};

/// Repository for share invitations and grants.
#[derive(Debug, Clone)]
pub struct ShareRepository {
    pool: PgPool,
}

impl ShareRepository {
    /// Create a new share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a share by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SharedItem>> {
        sqlx::query_as::<_, SharedItem>("SELECT * FROM shared_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share", e))
    }

    /// Find a pending invitation by its token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<SharedItem>> {
        sqlx::query_as::<_, SharedItem>("SELECT * FROM shared_items WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find share by token", e)
            })
    }

    /// Whether the item is already shared with the given email.
    pub async fn exists_for_target(
        &self,
        item_type: ShareItemType,
        item_id: Uuid,
        email: &str,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS( \
                SELECT 1 FROM shared_items \
                WHERE item_type = $1 AND item_id = $2 AND shared_with_email = LOWER($3) \
             )",
        )
        .bind(item_type)
        .bind(item_id)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check existing share", e)
        })
    }

    /// Create a new share invitation.
    pub async fn create(&self, data: &CreateSharedItem) -> AppResult<SharedItem> {
        sqlx::query_as::<_, SharedItem>(
            "INSERT INTO shared_items \
             (item_type, item_id, owner_id, shared_with_email, permission, token, expires_at) \
             VALUES ($1, $2, $3, LOWER($4), $5, $6, $7) RETURNING *",
        )
        .bind(data.target.item_type())
        .bind(data.target.item_id())
        .bind(data.owner_id)
        .bind(&data.shared_with_email)
        .bind(data.permission)
        .bind(&data.token)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("shared_items_item_email_key") =>
            {
                AppError::conflict("Item is already shared with this user")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create share", e),
        })
    }

    /// Mark an invitation accepted, clearing its token.
    pub async fn accept(&self, id: Uuid) -> AppResult<Option<SharedItem>> {
        sqlx::query_as::<_, SharedItem>(
            "UPDATE shared_items SET accepted = TRUE, token = NULL, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to accept share", e))
    }

    /// List the shares a user has created, newest first.
    pub async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<SharedItem>> {
        sqlx::query_as::<_, SharedItem>(
            "SELECT * FROM shared_items WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shares", e))
    }

    /// List every share of one item, newest first.
    pub async fn find_by_target(
        &self,
        item_type: ShareItemType,
        item_id: Uuid,
    ) -> AppResult<Vec<SharedItem>> {
        sqlx::query_as::<_, SharedItem>(
            "SELECT * FROM shared_items \
             WHERE item_type = $1 AND item_id = $2 \
             ORDER BY created_at DESC",
        )
        .bind(item_type)
        .bind(item_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list shares for item", e)
        })
    }

    /// Change a share's permission level.
    pub async fn update_permission(
        &self,
        id: Uuid,
        permission: SharePermission,
    ) -> AppResult<Option<SharedItem>> {
        sqlx::query_as::<_, SharedItem>(
            "UPDATE shared_items SET permission = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(permission)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update share permission", e)
        })
    }

    /// List accepted shares addressed to the given email, newest first.
    pub async fn find_accepted_for_email(&self, email: &str) -> AppResult<Vec<SharedItem>> {
        sqlx::query_as::<_, SharedItem>(
            "SELECT * FROM shared_items \
             WHERE shared_with_email = LOWER($1) AND accepted = TRUE \
             ORDER BY created_at DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list received shares", e)
        })
    }

    /// Whether an accepted share of the item exists for the given email.
    pub async fn has_accepted_share(
        &self,
        item_type: ShareItemType,
        item_id: Uuid,
        email: &str,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS( \
                SELECT 1 FROM shared_items \
                WHERE item_type = $1 AND item_id = $2 \
                  AND shared_with_email = LOWER($3) AND accepted = TRUE \
             )",
        )
        .bind(item_type)
        .bind(item_id)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check share access", e)
        })
    }

    /// Delete a share.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM shared_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete share", e))?;

        Ok(result.rows_affected() > 0)
    }
}
