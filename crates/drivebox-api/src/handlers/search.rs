//! Search handler.

use axum::Json;
use axum::extract::{Query, State};

use drivebox_service::search::SearchResults;

use crate::dto::request::SearchParams;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/search?q=...
pub async fn search(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<SearchResults>>, ApiError> {
    let results = state.search_service.search(&auth, &params.q).await?;
    Ok(Json(ApiResponse::ok(results)))
}
