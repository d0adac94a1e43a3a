//! File upload, retrieval, and lifecycle operations.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_database::repositories::file::FileRepository;
use drivebox_database::repositories::folder::FolderRepository;
use drivebox_database::repositories::trash::TrashRepository;
use drivebox_database::repositories::user::UserRepository;
use drivebox_entity::file::model::{CreateFile, File};
use drivebox_entity::folder::model::Folder;
use drivebox_entity::share::model::ShareTarget;

use crate::blob::BlobClient;
use crate::context::RequestContext;
use crate::share::access::AccessService;

use super::upload::{UploadLimits, UploadRequest, blob_key_for};

/// Manages file metadata and the blobs behind it.
#[derive(Debug, Clone)]
pub struct FileService {
    file_repo: Arc<FileRepository>,
    folder_repo: Arc<FolderRepository>,
    user_repo: Arc<UserRepository>,
    trash_repo: Arc<TrashRepository>,
    access: Arc<AccessService>,
    blob: BlobClient,
    limits: UploadLimits,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        user_repo: Arc<UserRepository>,
        trash_repo: Arc<TrashRepository>,
        access: Arc<AccessService>,
        blob: BlobClient,
        limits: UploadLimits,
    ) -> Self {
        Self {
            file_repo,
            folder_repo,
            user_repo,
            trash_repo,
            access,
            blob,
            limits,
        }
    }

    /// Resolve a file the current user owns, or fail with 404.
    async fn find_owned(&self, ctx: &RequestContext, id: Uuid) -> AppResult<File> {
        let file = self
            .file_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        if file.owner_id != ctx.user_id {
            return Err(AppError::not_found("File not found"));
        }

        Ok(file)
    }

    /// Resolve the destination folder for an upload or listing.
    async fn resolve_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
    ) -> AppResult<Folder> {
        let folder = match folder_id {
            Some(id) => {
                let folder = self
                    .folder_repo
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Folder not found"))?;
                if folder.owner_id != ctx.user_id {
                    return Err(AppError::not_found("Folder not found"));
                }
                folder
            }
            None => self
                .folder_repo
                .find_root(ctx.user_id)
                .await?
                .ok_or_else(|| AppError::internal("User has no root folder"))?,
        };

        if folder.is_trash {
            return Err(AppError::validation("Destination folder is in the trash"));
        }

        Ok(folder)
    }

    /// Uploads a file: size ceiling, then quota reservation, then blob
    /// write, then the metadata row.
    ///
    /// The quota reservation is released again if any later step fails,
    /// and a blob written for a row that never landed is deleted
    /// best-effort.
    pub async fn upload(&self, ctx: &RequestContext, request: UploadRequest) -> AppResult<File> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("File name must not be empty"));
        }

        let size = request.data.len() as i64;
        if size > self.limits.max_file_size {
            return Err(AppError::payload_too_large(format!(
                "File exceeds the {} byte limit",
                self.limits.max_file_size
            )));
        }

        let folder = self.resolve_folder(ctx, request.folder_id).await?;

        let reserved = self
            .user_repo
            .try_reserve_storage(ctx.user_id, size, self.limits.user_quota)
            .await?;
        if !reserved {
            return Err(AppError::quota_exceeded("Storage quota exceeded"));
        }

        let key = blob_key_for(name);
        let blob = match self.blob.upload(&key, request.data).await {
            Ok(blob) => blob,
            Err(e) => {
                self.user_repo.release_storage(ctx.user_id, size).await?;
                return Err(e);
            }
        };

        let thumbnail_url = if File::thumbnail_eligible(&request.mime_type) {
            self.blob.thumbnail_url(&blob.public_id)
        } else {
            None
        };

        let created = self
            .file_repo
            .create(&CreateFile {
                name: name.to_string(),
                mime_type: request.mime_type.clone(),
                size,
                url: blob.url,
                thumbnail_url,
                public_id: blob.public_id.clone(),
                owner_id: ctx.user_id,
                folder_id: Some(folder.id),
            })
            .await;

        match created {
            Ok(file) => {
                info!(
                    file_id = %file.id,
                    folder_id = %folder.id,
                    size,
                    mime_type = %file.mime_type,
                    user_id = %ctx.user_id,
                    "File uploaded"
                );
                Ok(file)
            }
            Err(e) => {
                self.blob.delete_best_effort(&blob.public_id).await;
                self.user_repo.release_storage(ctx.user_id, size).await?;
                Err(e)
            }
        }
    }

    /// Opens a file: owners get it with `viewed_at` touched, recipients
    /// of an accepted share get it read-only.
    pub async fn open_file(&self, ctx: &RequestContext, id: Uuid) -> AppResult<File> {
        let file = self
            .file_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        if file.owner_id == ctx.user_id {
            self.file_repo.touch_viewed(id).await?;
            return Ok(file);
        }

        if self.access.can_access(ctx, ShareTarget::File(id)).await? {
            return Ok(file);
        }

        Err(AppError::not_found("File not found"))
    }

    /// Lists files in a folder (`None` means the root).
    ///
    /// `trashed` selects the trash flag to list; by default only live
    /// files are returned.
    pub async fn list_files(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
        starred_only: bool,
        trashed: Option<bool>,
    ) -> AppResult<Vec<File>> {
        let folder = self.resolve_folder(ctx, folder_id).await?;
        self.file_repo
            .find_in_folder(ctx.user_id, Some(folder.id), starred_only, trashed)
            .await
    }

    /// Renames a file.
    pub async fn rename_file(&self, ctx: &RequestContext, id: Uuid, name: &str) -> AppResult<File> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("File name must not be empty"));
        }

        self.find_owned(ctx, id).await?;
        self.file_repo
            .rename(id, name)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Stars or unstars a file.
    pub async fn set_starred(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        starred: bool,
    ) -> AppResult<File> {
        self.find_owned(ctx, id).await?;
        self.file_repo
            .set_starred(id, starred)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Moves a file to the trash.
    pub async fn trash_file(&self, ctx: &RequestContext, id: Uuid) -> AppResult<File> {
        self.find_owned(ctx, id).await?;
        let trashed = self
            .file_repo
            .set_trashed(id, true)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        info!(file_id = %id, user_id = %ctx.user_id, "File moved to trash");
        Ok(trashed)
    }

    /// Restores a file from the trash.
    pub async fn restore_file(&self, ctx: &RequestContext, id: Uuid) -> AppResult<File> {
        self.find_owned(ctx, id).await?;
        self.file_repo
            .set_trashed(id, false)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Permanently deletes a file, releasing its blob and quota.
    pub async fn purge_file(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let file = self.find_owned(ctx, id).await?;

        self.blob.delete_best_effort(&file.public_id).await;
        self.trash_repo
            .purge(ctx.user_id, &[], &[file.id], file.size)
            .await?;

        info!(file_id = %id, released_bytes = file.size, user_id = %ctx.user_id, "File purged");
        Ok(())
    }
}
