//! Trash listing and emptying.

use std::sync::Arc;

use tracing::info;

use drivebox_core::result::AppResult;
use drivebox_database::repositories::file::FileRepository;
use drivebox_database::repositories::folder::FolderRepository;
use drivebox_database::repositories::trash::TrashRepository;
use drivebox_entity::file::model::File;
use drivebox_entity::folder::model::Folder;

use crate::blob::BlobClient;
use crate::context::RequestContext;

/// Contents of a user's trash.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TrashListing {
    /// Trashed folders (top-level entries only, not their subtrees).
    pub folders: Vec<Folder>,
    /// Trashed files.
    pub files: Vec<File>,
}

/// What an empty-trash run removed.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct EmptyTrashReport {
    /// Number of file rows deleted, including files inside trashed
    /// folders.
    pub deleted_files: usize,
    /// Bytes returned to the user's quota.
    pub freed_storage: i64,
}

/// Manages the trash.
#[derive(Debug, Clone)]
pub struct TrashService {
    folder_repo: Arc<FolderRepository>,
    file_repo: Arc<FileRepository>,
    trash_repo: Arc<TrashRepository>,
    blob: BlobClient,
}

impl TrashService {
    /// Creates a new trash service.
    pub fn new(
        folder_repo: Arc<FolderRepository>,
        file_repo: Arc<FileRepository>,
        trash_repo: Arc<TrashRepository>,
        blob: BlobClient,
    ) -> Self {
        Self {
            folder_repo,
            file_repo,
            trash_repo,
            blob,
        }
    }

    /// Lists everything currently in the user's trash.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<TrashListing> {
        let folders = self.folder_repo.find_trashed(ctx.user_id).await?;
        let files = self.file_repo.find_trashed(ctx.user_id).await?;
        Ok(TrashListing { folders, files })
    }

    /// Permanently deletes everything in the user's trash.
    ///
    /// Blobs are released best-effort first; the rows, their shares, and
    /// the storage accounting then go in a single transaction.
    pub async fn empty(&self, ctx: &RequestContext) -> AppResult<EmptyTrashReport> {
        let set = self.trash_repo.collect_trash(ctx.user_id).await?;

        for file in &set.files {
            self.blob.delete_best_effort(&file.public_id).await;
        }

        let file_ids: Vec<_> = set.files.iter().map(|f| f.id).collect();
        let released = set.total_bytes();
        self.trash_repo
            .purge(ctx.user_id, &set.folder_ids, &file_ids, released)
            .await?;

        info!(
            folders = set.folder_ids.len(),
            files = file_ids.len(),
            released_bytes = released,
            user_id = %ctx.user_id,
            "Trash emptied"
        );
        Ok(EmptyTrashReport {
            deleted_files: file_ids.len(),
            freed_storage: released,
        })
    }
}
