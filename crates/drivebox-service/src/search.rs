//! Name search across a user's folders and files.

use std::sync::Arc;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_database::repositories::file::FileRepository;
use drivebox_database::repositories::folder::FolderRepository;
use drivebox_entity::file::model::File;
use drivebox_entity::folder::model::Folder;

use crate::context::RequestContext;

/// Maximum hits returned per item kind.
const SEARCH_LIMIT: i64 = 10;

/// Search hits, capped per kind.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SearchResults {
    /// Matching folders.
    pub folders: Vec<Folder>,
    /// Matching files.
    pub files: Vec<File>,
}

/// Case-insensitive substring search over item names.
#[derive(Debug, Clone)]
pub struct SearchService {
    folder_repo: Arc<FolderRepository>,
    file_repo: Arc<FileRepository>,
}

impl SearchService {
    /// Creates a new search service.
    pub fn new(folder_repo: Arc<FolderRepository>, file_repo: Arc<FileRepository>) -> Self {
        Self {
            folder_repo,
            file_repo,
        }
    }

    /// Searches the user's non-trashed items by name fragment.
    pub async fn search(&self, ctx: &RequestContext, query: &str) -> AppResult<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::validation("Search query must not be empty"));
        }

        let folders = self
            .folder_repo
            .search_by_name(ctx.user_id, query, SEARCH_LIMIT)
            .await?;
        let files = self
            .file_repo
            .search_by_name(ctx.user_id, query, SEARCH_LIMIT)
            .await?;

        Ok(SearchResults { folders, files })
    }
}
