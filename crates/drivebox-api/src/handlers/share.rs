//! Sharing handlers: invitations, acceptance, listing, revocation.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use drivebox_core::error::AppError;
use drivebox_entity::share::model::{ShareItemType, ShareTarget, SharedItem};
use drivebox_service::share::service::{CreateShareRequest, ShareWithItem};

use crate::dto::request::{CreateShareBody, ShareListParams, UpdateShareBody};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/share — shares the user has created, or with
/// `?file_id=`/`?folder_id=` every share of that one item.
pub async fn list_shares(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ShareListParams>,
) -> Result<Json<ApiResponse<Vec<ShareWithItem>>>, ApiError> {
    let target = match (params.file_id, params.folder_id) {
        (Some(_), Some(_)) => {
            return Err(
                AppError::validation("file_id and folder_id are mutually exclusive").into(),
            );
        }
        (Some(id), None) => Some(ShareTarget::File(id)),
        (None, Some(id)) => Some(ShareTarget::Folder(id)),
        (None, None) => None,
    };

    let shares = match target {
        Some(target) => state.share_service.list_for_item(&auth, target).await?,
        None => state.share_service.list_created(&auth).await?,
    };
    Ok(Json(ApiResponse::ok(shares)))
}

/// GET /api/share/user — accepted shares addressed to the user.
pub async fn list_received(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<ShareWithItem>>>, ApiError> {
    let shares = state.share_service.list_received(&auth).await?;
    Ok(Json(ApiResponse::ok(shares)))
}

/// POST /api/share
pub async fn create_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateShareBody>,
) -> Result<(StatusCode, Json<ApiResponse<SharedItem>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let target = match req.item_type {
        ShareItemType::File => ShareTarget::File(req.item_id),
        ShareItemType::Folder => ShareTarget::Folder(req.item_id),
    };

    let share = state
        .share_service
        .create_share(
            &auth,
            CreateShareRequest {
                target,
                email: req.email,
                permission: req.permission,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(share))))
}

/// GET /api/share/invitation/{token}
pub async fn get_invitation(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<ShareWithItem>>, ApiError> {
    let invitation = state.share_service.get_invitation(&token).await?;
    Ok(Json(ApiResponse::ok(invitation)))
}

/// POST /api/share/invitation/{token}/accept
pub async fn accept_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<SharedItem>>, ApiError> {
    let share = state.share_service.accept_invitation(&auth, &token).await?;
    Ok(Json(ApiResponse::ok(share)))
}

/// GET /api/share/{id}
pub async fn get_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ShareWithItem>>, ApiError> {
    let share = state.share_service.get_share(&auth, id).await?;
    Ok(Json(ApiResponse::ok(share)))
}

/// PUT /api/share/{id}
pub async fn put_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateShareBody>,
) -> Result<Json<ApiResponse<SharedItem>>, ApiError> {
    let share = state
        .share_service
        .update_permission(&auth, id, req.permission)
        .await?;
    Ok(Json(ApiResponse::ok(share)))
}

/// DELETE /api/share/{id}
pub async fn revoke_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    state.share_service.revoke(&auth, id).await?;
    Ok(Json(ApiResponse::ok(serde_json::json!({ "revoked": true }))))
}
