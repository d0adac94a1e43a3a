//! Trash repository implementation.
//!
//! Purging touches four tables at once (shares, files, folders, storage
//! accounting), so the destructive half lives behind a single transaction
//! here rather than being stitched together from the per-table
//! repositories.

use sqlx::PgPool;
use uuid::Uuid;

use drivebox_core::error::{AppError, ErrorKind};
use drivebox_core::result::AppResult;
use drivebox_entity::file::model::File;

/// Everything a purge will remove: folder subtrees and the files they
/// (or the trash directly) contain.
#[derive(Debug, Clone)]
pub struct PurgeSet {
    /// Folder IDs to delete, subtrees included.
    pub folder_ids: Vec<Uuid>,
    /// File rows to delete; kept whole so blobs can be released first.
    pub files: Vec<File>,
}

impl PurgeSet {
    /// Total bytes the files in this set occupy.
    pub fn total_bytes(&self) -> i64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

/// Repository for transactional purge operations.
#[derive(Debug, Clone)]
pub struct TrashRepository {
    pool: PgPool,
}

impl TrashRepository {
    /// Create a new trash repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Collect everything currently in a user's trash, expanding trashed
    /// folders to their full subtrees.
    pub async fn collect_trash(&self, owner_id: Uuid) -> AppResult<PurgeSet> {
        let folder_ids = sqlx::query_scalar::<_, Uuid>(
            "WITH RECURSIVE trashed AS ( \
                SELECT id FROM folders WHERE owner_id = $1 AND is_trash = TRUE \
                UNION \
                SELECT f.id FROM folders f INNER JOIN trashed t ON f.parent_id = t.id \
             ) SELECT id FROM trashed",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to collect trashed folders", e)
        })?;

        let files = sqlx::query_as::<_, File>(
            "SELECT * FROM files \
             WHERE owner_id = $1 AND (is_trash = TRUE OR folder_id = ANY($2))",
        )
        .bind(owner_id)
        .bind(&folder_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to collect trashed files", e)
        })?;

        Ok(PurgeSet { folder_ids, files })
    }

    /// Delete the given folders and files, their shares, and release the
    /// accounted storage, all in one transaction.
    pub async fn purge(
        &self,
        owner_id: Uuid,
        folder_ids: &[Uuid],
        file_ids: &[Uuid],
        released_bytes: i64,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin purge transaction", e)
        })?;

        sqlx::query(
            "DELETE FROM shared_items \
             WHERE (item_type = 'file' AND item_id = ANY($1)) \
                OR (item_type = 'folder' AND item_id = ANY($2))",
        )
        .bind(file_ids)
        .bind(folder_ids)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete shares", e))?;

        sqlx::query("DELETE FROM files WHERE id = ANY($1)")
            .bind(file_ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete files", e))?;

        sqlx::query("DELETE FROM folders WHERE id = ANY($1)")
            .bind(folder_ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folders", e)
            })?;

        sqlx::query(
            "UPDATE users SET used_storage = GREATEST(used_storage - $2, 0), \
             updated_at = NOW() WHERE id = $1",
        )
        .bind(owner_id)
        .bind(released_bytes)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to release storage", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit purge transaction", e)
        })
    }
}
