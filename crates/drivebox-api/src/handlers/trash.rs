//! Trash listing and emptying handlers.

use axum::Json;
use axum::extract::State;

use drivebox_service::trash::{EmptyTrashReport, TrashListing};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/trash
pub async fn list_trash(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<TrashListing>>, ApiError> {
    let listing = state.trash_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(listing)))
}

/// DELETE /api/trash/empty
pub async fn empty_trash(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<EmptyTrashReport>>, ApiError> {
    let report = state.trash_service.empty(&auth).await?;
    Ok(Json(ApiResponse::ok(report)))
}
