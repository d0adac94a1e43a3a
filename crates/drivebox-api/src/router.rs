//! Route definitions for the DriveBox HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    // Leave headroom above the raw file ceiling for multipart framing.
    let max_body = state.config.storage.max_upload_size_bytes as usize + 64 * 1024;
    let cors = build_cors_layer(&state.config.server.cors);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(folder_routes())
        .merge(file_routes())
        .merge(share_routes())
        .merge(trash_routes())
        .merge(search_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: register, login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Profile and storage accounting
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/profile", get(handlers::user::get_profile))
        .route("/users/profile", patch(handlers::user::update_profile))
        .route("/users/storage", get(handlers::user::get_storage))
}

/// Folder CRUD and tree navigation
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", get(handlers::folder::list_folders))
        .route("/folders", post(handlers::folder::create_folder))
        .route("/folders/{id}", get(handlers::folder::get_folder))
        .route("/folders/{id}", patch(handlers::folder::update_folder))
        .route("/folders/{id}", put(handlers::folder::put_folder))
        .route("/folders/{id}", delete(handlers::folder::delete_folder))
        .route(
            "/folders/{id}/breadcrumbs",
            get(handlers::folder::get_breadcrumbs),
        )
}

/// File upload and lifecycle
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(handlers::file::list_files))
        .route("/files", post(handlers::file::upload_file))
        .route("/files/{id}", get(handlers::file::get_file))
        .route("/files/{id}", patch(handlers::file::update_file))
        .route("/files/{id}", put(handlers::file::put_file))
        .route("/files/{id}", delete(handlers::file::delete_file))
}

/// Sharing: invitations, acceptance, listing, revocation
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/share", get(handlers::share::list_shares))
        .route("/share", post(handlers::share::create_share))
        .route("/share/user", get(handlers::share::list_received))
        .route(
            "/share/invitation/{token}",
            get(handlers::share::get_invitation),
        )
        .route(
            "/share/invitation/{token}/accept",
            post(handlers::share::accept_invitation),
        )
        .route("/share/{id}", get(handlers::share::get_share))
        .route("/share/{id}", put(handlers::share::put_share))
        .route("/share/{id}", delete(handlers::share::revoke_share))
}

/// Trash listing and emptying
fn trash_routes() -> Router<AppState> {
    Router::new()
        .route("/trash", get(handlers::trash::list_trash))
        .route("/trash/empty", delete(handlers::trash::empty_trash))
}

/// Name search
fn search_routes() -> Router<AppState> {
    Router::new().route("/search", get(handlers::search::search))
}

/// Liveness and dependency health
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
