//! Profile and storage accounting handlers.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use drivebox_core::error::AppError;
use drivebox_entity::user::model::User;
use drivebox_service::user::service::StorageUsage;

use crate::dto::request::UpdateProfileRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.user_service.profile(&auth).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// PATCH /api/users/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state.user_service.update_profile(&auth, &req.name).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// GET /api/users/storage
pub async fn get_storage(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<StorageUsage>>, ApiError> {
    let usage = state.user_service.storage_usage(&auth).await?;
    Ok(Json(ApiResponse::ok(usage)))
}
