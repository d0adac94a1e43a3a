//! Folder CRUD and tree operations.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_database::repositories::file::FileRepository;
use drivebox_database::repositories::folder::FolderRepository;
use drivebox_database::repositories::trash::TrashRepository;
use drivebox_entity::folder::model::{Breadcrumb, CreateFolder, Folder};
use drivebox_entity::share::model::ShareTarget;

use crate::blob::BlobClient;
use crate::context::RequestContext;
use crate::share::access::AccessService;

/// Request to create a new folder.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder ID (None means the user's root folder).
    pub parent_id: Option<Uuid>,
}

/// Manages the folder tree.
#[derive(Debug, Clone)]
pub struct FolderService {
    folder_repo: Arc<FolderRepository>,
    file_repo: Arc<FileRepository>,
    trash_repo: Arc<TrashRepository>,
    access: Arc<AccessService>,
    blob: BlobClient,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folder_repo: Arc<FolderRepository>,
        file_repo: Arc<FileRepository>,
        trash_repo: Arc<TrashRepository>,
        access: Arc<AccessService>,
        blob: BlobClient,
    ) -> Self {
        Self {
            folder_repo,
            file_repo,
            trash_repo,
            access,
            blob,
        }
    }

    /// Resolve a folder the current user owns, or fail with 404.
    ///
    /// Foreign folders are reported as not found rather than forbidden so
    /// the API does not leak which IDs exist.
    async fn find_owned(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Folder> {
        let folder = self
            .folder_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        if folder.owner_id != ctx.user_id {
            return Err(AppError::not_found("Folder not found"));
        }

        Ok(folder)
    }

    /// Resolve an explicit parent ID, or the user's root folder.
    async fn resolve_parent(
        &self,
        ctx: &RequestContext,
        parent_id: Option<Uuid>,
    ) -> AppResult<Folder> {
        let parent = match parent_id {
            Some(id) => self.find_owned(ctx, id).await?,
            None => self
                .folder_repo
                .find_root(ctx.user_id)
                .await?
                .ok_or_else(|| AppError::internal("User has no root folder"))?,
        };

        if parent.is_trash {
            return Err(AppError::validation("Parent folder is in the trash"));
        }

        Ok(parent)
    }

    /// Gets a folder the user owns or holds an accepted share of.
    ///
    /// A share of a folder opens that folder only; it does not extend
    /// to the files and folders inside it.
    pub async fn get_folder(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Folder> {
        let folder = self
            .folder_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        if folder.owner_id == ctx.user_id {
            return Ok(folder);
        }
        if self.access.can_access(ctx, ShareTarget::Folder(id)).await? {
            return Ok(folder);
        }

        Err(AppError::not_found("Folder not found"))
    }

    /// Creates a folder under the given parent.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        request: CreateFolderRequest,
    ) -> AppResult<Folder> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name must not be empty"));
        }

        let parent = self.resolve_parent(ctx, request.parent_id).await?;

        if self
            .folder_repo
            .name_exists_in_parent(ctx.user_id, Some(parent.id), name, None)
            .await?
        {
            return Err(AppError::conflict(format!(
                "A folder named '{name}' already exists here"
            )));
        }

        let folder = self
            .folder_repo
            .create(&CreateFolder {
                name: name.to_string(),
                owner_id: ctx.user_id,
                parent_id: Some(parent.id),
                is_root: false,
            })
            .await?;

        info!(
            folder_id = %folder.id,
            parent_id = %parent.id,
            user_id = %ctx.user_id,
            "Folder created"
        );
        Ok(folder)
    }

    /// Lists folders under a parent (`None` means the root).
    ///
    /// `trashed` selects the trash flag to list; by default only live
    /// folders are returned.
    pub async fn list_folders(
        &self,
        ctx: &RequestContext,
        parent_id: Option<Uuid>,
        starred_only: bool,
        trashed: Option<bool>,
    ) -> AppResult<Vec<Folder>> {
        let parent = self.resolve_parent(ctx, parent_id).await?;
        self.folder_repo
            .find_children(ctx.user_id, Some(parent.id), starred_only, trashed)
            .await
    }

    /// Renames a folder. The root folder cannot be renamed.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        name: &str,
    ) -> AppResult<Folder> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name must not be empty"));
        }

        let folder = self.find_owned(ctx, id).await?;
        if folder.is_root {
            return Err(AppError::forbidden("The root folder cannot be renamed"));
        }

        if self
            .folder_repo
            .name_exists_in_parent(ctx.user_id, folder.parent_id, name, Some(id))
            .await?
        {
            return Err(AppError::conflict(format!(
                "A folder named '{name}' already exists here"
            )));
        }

        self.folder_repo
            .rename(id, name)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Moves a folder under a new parent.
    ///
    /// The root folder is immovable, a folder cannot become its own
    /// parent, and a folder can never be moved into its own subtree.
    pub async fn move_folder(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        new_parent_id: Uuid,
    ) -> AppResult<Folder> {
        let folder = self.find_owned(ctx, id).await?;
        if folder.is_root {
            return Err(AppError::forbidden("The root folder cannot be moved"));
        }
        if id == new_parent_id {
            return Err(AppError::conflict("A folder cannot be its own parent"));
        }

        let parent = self.resolve_parent(ctx, Some(new_parent_id)).await?;

        if self.folder_repo.is_in_subtree(id, parent.id).await? {
            return Err(AppError::conflict(
                "A folder cannot be moved into its own subtree",
            ));
        }

        if self
            .folder_repo
            .name_exists_in_parent(ctx.user_id, Some(parent.id), &folder.name, Some(id))
            .await?
        {
            return Err(AppError::conflict(format!(
                "A folder named '{}' already exists in the destination",
                folder.name
            )));
        }

        let moved = self
            .folder_repo
            .set_parent(id, parent.id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        info!(folder_id = %id, new_parent_id = %parent.id, user_id = %ctx.user_id, "Folder moved");
        Ok(moved)
    }

    /// Stars or unstars a folder.
    pub async fn set_starred(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        starred: bool,
    ) -> AppResult<Folder> {
        self.find_owned(ctx, id).await?;
        self.folder_repo
            .set_starred(id, starred)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Moves a folder to the trash. The root folder cannot be trashed.
    pub async fn trash_folder(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Folder> {
        let folder = self.find_owned(ctx, id).await?;
        if folder.is_root {
            return Err(AppError::forbidden("The root folder cannot be deleted"));
        }

        let trashed = self
            .folder_repo
            .set_trashed(id, true)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        info!(folder_id = %id, user_id = %ctx.user_id, "Folder moved to trash");
        Ok(trashed)
    }

    /// Restores a folder from the trash.
    pub async fn restore_folder(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Folder> {
        self.find_owned(ctx, id).await?;
        self.folder_repo
            .set_trashed(id, false)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Permanently deletes a folder, its subtree, and all contained files.
    ///
    /// Blobs are released best-effort before the rows go; a blob backend
    /// failure never aborts the purge.
    pub async fn purge_folder(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let folder = self.find_owned(ctx, id).await?;
        if folder.is_root {
            return Err(AppError::forbidden("The root folder cannot be deleted"));
        }

        let folder_ids = self.folder_repo.find_subtree_ids(id).await?;
        let files = self.file_repo.find_by_folder_ids(&folder_ids).await?;

        for file in &files {
            self.blob.delete_best_effort(&file.public_id).await;
        }

        let file_ids: Vec<Uuid> = files.iter().map(|f| f.id).collect();
        let released: i64 = files.iter().map(|f| f.size).sum();
        self.trash_repo
            .purge(ctx.user_id, &folder_ids, &file_ids, released)
            .await?;

        info!(
            folder_id = %id,
            folders = folder_ids.len(),
            files = file_ids.len(),
            released_bytes = released,
            user_id = %ctx.user_id,
            "Folder purged"
        );
        Ok(())
    }

    /// Breadcrumb trail for a folder, root-first, excluding the root.
    pub async fn breadcrumbs(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Vec<Breadcrumb>> {
        self.find_owned(ctx, id).await?;
        self.folder_repo.find_breadcrumbs(id, ctx.user_id).await
    }
}
