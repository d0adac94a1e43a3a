//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::state::AppState;

/// Health report for the service and its dependencies.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// Overall status: "ok" or "degraded".
    pub status: &'static str,
    /// Database reachability.
    pub database: bool,
    /// Blob store reachability.
    pub storage: bool,
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let database = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
        .is_ok();
    let storage = state.blob.health_check().await.is_ok();

    let report = HealthReport {
        status: if database && storage { "ok" } else { "degraded" },
        database,
        storage,
    };
    let code = if database && storage {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(report))
}
