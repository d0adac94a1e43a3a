//! File repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use drivebox_core::error::{AppError, ErrorKind};
use drivebox_core::result::AppResult;
use drivebox_entity::file::model::{CreateFile, File};

/// Repository for file metadata rows.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a file by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// List files in a folder (`None` lists the top level).
    ///
    /// `trashed` filters on the trash flag; omitting it lists only live
    /// files.
    pub async fn find_in_folder(
        &self,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
        starred_only: bool,
        trashed: Option<bool>,
    ) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files \
             WHERE owner_id = $1 AND folder_id IS NOT DISTINCT FROM $2 \
               AND is_trash = COALESCE($4, FALSE) \
               AND ($3 = FALSE OR is_starred = TRUE) \
             ORDER BY name ASC",
        )
        .bind(owner_id)
        .bind(folder_id)
        .bind(starred_only)
        .bind(trashed)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// List a user's trashed files.
    pub async fn find_trashed(&self, owner_id: Uuid) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE owner_id = $1 AND is_trash = TRUE ORDER BY updated_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list trashed files", e)
        })
    }

    /// All files anywhere under the given folders, trashed or not.
    pub async fn find_by_folder_ids(&self, folder_ids: &[Uuid]) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE folder_id = ANY($1)")
            .bind(folder_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list files by folder", e)
            })
    }

    /// Record a newly uploaded file.
    pub async fn create(&self, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files (name, mime_type, size, url, thumbnail_url, public_id, owner_id, folder_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.mime_type)
        .bind(data.size)
        .bind(&data.url)
        .bind(&data.thumbnail_url)
        .bind(&data.public_id)
        .bind(data.owner_id)
        .bind(data.folder_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))
    }

    /// Rename a file.
    pub async fn rename(&self, id: Uuid, name: &str) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename file", e))
    }

    /// Star or unstar a file.
    pub async fn set_starred(&self, id: Uuid, starred: bool) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET is_starred = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(starred)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to star file", e))
    }

    /// Move a file into or out of the trash.
    pub async fn set_trashed(&self, id: Uuid, trashed: bool) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET is_trash = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(trashed)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to trash file", e))
    }

    /// Record that the owner opened the file.
    pub async fn touch_viewed(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE files SET viewed_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update viewed time", e)
            })?;

        Ok(())
    }

    /// Search a user's non-trashed files by name fragment.
    pub async fn search_by_name(
        &self,
        owner_id: Uuid,
        query: &str,
        limit: i64,
    ) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files \
             WHERE owner_id = $1 AND is_trash = FALSE AND name ILIKE '%' || $2 || '%' \
             ORDER BY name ASC LIMIT $3",
        )
        .bind(owner_id)
        .bind(query)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search files", e))
    }
}
