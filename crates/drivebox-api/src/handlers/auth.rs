//! Registration and login handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use drivebox_core::error::AppError;
use drivebox_entity::user::model::User;
use drivebox_service::user::service::LoginResult;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LoginResult>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let result = state
        .user_service
        .register(&req.name, &req.email, &req.password)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(result))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResult>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let result = state.user_service.login(&req.email, &req.password).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.user_service.profile(&auth).await?;
    Ok(Json(ApiResponse::ok(user)))
}
