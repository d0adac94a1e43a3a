//! Folder CRUD and tree handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use drivebox_core::error::AppError;
use drivebox_entity::folder::model::{Breadcrumb, Folder};
use drivebox_service::folder::service::CreateFolderRequest as SvcCreateFolder;

use crate::dto::request::{
    CreateFolderRequest, DeleteParams, ItemOperation, ListParams, UpdateFolderBody,
    UpdateItemRequest,
};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/folders?parent_id=...&starred=...&is_trash=...
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Vec<Folder>>>, ApiError> {
    let folders = state
        .folder_service
        .list_folders(&auth, params.parent_id, params.starred, params.is_trash)
        .await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let folder = state
        .folder_service
        .create_folder(
            &auth,
            SvcCreateFolder {
                name: req.name,
                parent_id: req.parent_id,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let folder = state.folder_service.get_folder(&auth, id).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PATCH /api/folders/{id}
///
/// Dispatches on the body: a flag operation, a rename, or a move.
pub async fn update_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let folder = match req {
        UpdateItemRequest {
            operation: Some(op),
            ..
        } => match op {
            ItemOperation::Star => state.folder_service.set_starred(&auth, id, true).await?,
            ItemOperation::Unstar => state.folder_service.set_starred(&auth, id, false).await?,
            ItemOperation::Restore => state.folder_service.restore_folder(&auth, id).await?,
        },
        UpdateItemRequest {
            name: Some(name), ..
        } => state.folder_service.rename_folder(&auth, id, &name).await?,
        UpdateItemRequest {
            parent_id: Some(parent_id),
            ..
        } => state.folder_service.move_folder(&auth, id, parent_id).await?,
        _ => {
            return Err(AppError::validation(
                "One of operation, name, or parent_id is required",
            )
            .into());
        }
    };

    Ok(Json(ApiResponse::ok(folder)))
}

/// PUT /api/folders/{id}
///
/// Applies the given fields: rename, move, starred flag, in any
/// combination.
pub async fn put_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateFolderBody>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    if req.name.is_none() && req.parent_id.is_none() && req.is_starred.is_none() {
        return Err(
            AppError::validation("One of name, parent_id, or is_starred is required").into(),
        );
    }

    let mut folder = None;
    if let Some(name) = &req.name {
        folder = Some(state.folder_service.rename_folder(&auth, id, name).await?);
    }
    if let Some(parent_id) = req.parent_id {
        folder = Some(state.folder_service.move_folder(&auth, id, parent_id).await?);
    }
    if let Some(starred) = req.is_starred {
        folder = Some(state.folder_service.set_starred(&auth, id, starred).await?);
    }

    match folder {
        Some(folder) => Ok(Json(ApiResponse::ok(folder))),
        None => Err(AppError::internal("Folder update applied no fields").into()),
    }
}

/// DELETE /api/folders/{id}?permanent=...
///
/// Moves the folder to the trash; `permanent=true` purges it and its
/// subtree immediately instead.
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    if params.permanent {
        state.folder_service.purge_folder(&auth, id).await?;
    } else {
        state.folder_service.trash_folder(&auth, id).await?;
    }
    Ok(Json(ApiResponse::ok(
        serde_json::json!({ "deleted": true, "permanent": params.permanent }),
    )))
}

/// GET /api/folders/{id}/breadcrumbs
pub async fn get_breadcrumbs(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Breadcrumb>>>, ApiError> {
    let crumbs = state.folder_service.breadcrumbs(&auth, id).await?;
    Ok(Json(ApiResponse::ok(crumbs)))
}
