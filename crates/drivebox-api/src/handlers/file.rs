//! File upload, retrieval, and lifecycle handlers.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use bytes::Bytes;
use uuid::Uuid;

use drivebox_core::error::AppError;
use drivebox_entity::file::model::File;
use drivebox_service::file::upload::UploadRequest;

use crate::dto::request::{
    DeleteParams, ItemOperation, ListParams, UpdateFileBody, UpdateItemRequest,
};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/files?folder_id=...&starred=...&is_trash=...
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Vec<File>>>, ApiError> {
    let folder_id = params.folder_id.or(params.parent_id);
    let files = state
        .file_service
        .list_files(&auth, folder_id, params.starred, params.is_trash)
        .await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// POST /api/files (multipart/form-data)
///
/// Expects a `file` field plus an optional `folder_id` field.
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<File>>), ApiError> {
    let mut folder_id: Option<Uuid> = None;
    let mut file_name: Option<String> = None;
    let mut mime_type: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "folder_id" | "folderId" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                folder_id = Some(
                    Uuid::parse_str(&text)
                        .map_err(|_| AppError::validation("Invalid folder_id"))?,
                );
            }
            "file" => {
                file_name = field.file_name().map(String::from);
                mime_type = field.content_type().map(String::from);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let data = data.ok_or_else(|| AppError::validation("file field is required"))?;
    let name = file_name.ok_or_else(|| AppError::validation("file name is required"))?;
    let mime_type = mime_type.unwrap_or_else(|| "application/octet-stream".to_string());

    let file = state
        .file_service
        .upload(
            &auth,
            UploadRequest {
                name,
                mime_type,
                data,
                folder_id,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(file))))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let file = state.file_service.open_file(&auth, id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// PATCH /api/files/{id}
pub async fn update_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let file = match req {
        UpdateItemRequest {
            operation: Some(op),
            ..
        } => match op {
            ItemOperation::Star => state.file_service.set_starred(&auth, id, true).await?,
            ItemOperation::Unstar => state.file_service.set_starred(&auth, id, false).await?,
            ItemOperation::Restore => state.file_service.restore_file(&auth, id).await?,
        },
        UpdateItemRequest {
            name: Some(name), ..
        } => state.file_service.rename_file(&auth, id, &name).await?,
        _ => {
            return Err(AppError::validation("One of operation or name is required").into());
        }
    };

    Ok(Json(ApiResponse::ok(file)))
}

/// PUT /api/files/{id}
///
/// Applies the given fields: rename and the starred flag, in any
/// combination.
pub async fn put_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateFileBody>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    if req.name.is_none() && req.is_starred.is_none() {
        return Err(AppError::validation("One of name or is_starred is required").into());
    }

    let mut file = None;
    if let Some(name) = &req.name {
        file = Some(state.file_service.rename_file(&auth, id, name).await?);
    }
    if let Some(starred) = req.is_starred {
        file = Some(state.file_service.set_starred(&auth, id, starred).await?);
    }

    match file {
        Some(file) => Ok(Json(ApiResponse::ok(file))),
        None => Err(AppError::internal("File update applied no fields").into()),
    }
}

/// DELETE /api/files/{id}?permanent=...
///
/// Moves the file to the trash; `permanent=true` purges it immediately
/// instead.
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    if params.permanent {
        state.file_service.purge_file(&auth, id).await?;
    } else {
        state.file_service.trash_file(&auth, id).await?;
    }
    Ok(Json(ApiResponse::ok(
        serde_json::json!({ "deleted": true, "permanent": params.permanent }),
    )))
}
