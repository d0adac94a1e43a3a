//! Folder repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use drivebox_core::error::{AppError, ErrorKind};
use drivebox_core::result::AppResult;
use drivebox_entity::folder::model::{Breadcrumb, CreateFolder, Folder};

/// Repository for folder CRUD and tree queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a folder by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// Find a user's root folder.
    pub async fn find_root(&self, owner_id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE owner_id = $1 AND is_root = TRUE",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find root folder", e))
    }

    /// List folders under a parent (`None` lists the top level).
    ///
    /// `trashed` filters on the trash flag; omitting it lists only live
    /// folders.
    pub async fn find_children(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
        starred_only: bool,
        trashed: Option<bool>,
    ) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders \
             WHERE owner_id = $1 AND parent_id IS NOT DISTINCT FROM $2 \
               AND is_trash = COALESCE($4, FALSE) \
               AND ($3 = FALSE OR is_starred = TRUE) \
             ORDER BY name ASC",
        )
        .bind(owner_id)
        .bind(parent_id)
        .bind(starred_only)
        .bind(trashed)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    /// List a user's trashed folders.
    pub async fn find_trashed(&self, owner_id: Uuid) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE owner_id = $1 AND is_trash = TRUE ORDER BY updated_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list trashed folders", e)
        })
    }

    /// Whether a sibling with `name` already exists under `parent_id`.
    pub async fn name_exists_in_parent(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS( \
                SELECT 1 FROM folders \
                WHERE owner_id = $1 AND parent_id IS NOT DISTINCT FROM $2 \
                  AND name = $3 AND is_trash = FALSE AND id IS DISTINCT FROM $4 \
             )",
        )
        .bind(owner_id)
        .bind(parent_id)
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check folder name", e)
        })
    }

    /// Create a new folder.
    pub async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (name, owner_id, parent_id, is_root) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.owner_id)
        .bind(data.parent_id)
        .bind(data.is_root)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("folders_owner_root_key") =>
            {
                AppError::conflict("User already has a root folder")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create folder", e),
        })
    }

    /// Rename a folder.
    pub async fn rename(&self, id: Uuid, name: &str) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename folder", e))
    }

    /// Move a folder under a new parent.
    pub async fn set_parent(&self, id: Uuid, parent_id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET parent_id = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(parent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move folder", e))
    }

    /// Star or unstar a folder.
    pub async fn set_starred(&self, id: Uuid, starred: bool) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET is_starred = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(starred)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to star folder", e))
    }

    /// Move a folder into or out of the trash.
    pub async fn set_trashed(&self, id: Uuid, trashed: bool) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET is_trash = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(trashed)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to trash folder", e))
    }

    /// Collect the IDs of a folder and every folder below it.
    pub async fn find_subtree_ids(&self, id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "WITH RECURSIVE tree AS ( \
                SELECT id FROM folders WHERE id = $1 \
                UNION ALL \
                SELECT f.id FROM folders f INNER JOIN tree t ON f.parent_id = t.id \
             ) SELECT id FROM tree",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to collect subtree", e))
    }

    /// Whether `candidate` is `id` itself or any folder below it.
    pub async fn is_in_subtree(&self, id: Uuid, candidate: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "WITH RECURSIVE tree AS ( \
                SELECT id FROM folders WHERE id = $1 \
                UNION ALL \
                SELECT f.id FROM folders f INNER JOIN tree t ON f.parent_id = t.id \
             ) SELECT EXISTS(SELECT 1 FROM tree WHERE id = $2)",
        )
        .bind(id)
        .bind(candidate)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check subtree", e))
    }

    /// Breadcrumb trail for a folder, ordered root-first.
    ///
    /// Includes the folder itself but never the invisible root folder.
    pub async fn find_breadcrumbs(&self, id: Uuid, owner_id: Uuid) -> AppResult<Vec<Breadcrumb>> {
        sqlx::query_as::<_, Breadcrumb>(
            "WITH RECURSIVE ancestors AS ( \
                SELECT id, name, parent_id, is_root, 0 AS height \
                FROM folders WHERE id = $1 AND owner_id = $2 \
                UNION ALL \
                SELECT f.id, f.name, f.parent_id, f.is_root, a.height + 1 \
                FROM folders f INNER JOIN ancestors a ON f.id = a.parent_id \
             ) SELECT id, name FROM ancestors WHERE is_root = FALSE ORDER BY height DESC",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to build breadcrumbs", e))
    }

    /// Search a user's non-trashed folders by name fragment.
    pub async fn search_by_name(
        &self,
        owner_id: Uuid,
        query: &str,
        limit: i64,
    ) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders \
             WHERE owner_id = $1 AND is_trash = FALSE AND is_root = FALSE \
               AND name ILIKE '%' || $2 || '%' \
             ORDER BY name ASC LIMIT $3",
        )
        .bind(owner_id)
        .bind(query)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search folders", e))
    }
}
