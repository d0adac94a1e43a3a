//! # drivebox-api
//!
//! HTTP API layer for DriveBox built on Axum.
//!
//! Provides all REST endpoints, middleware (auth, CORS, compression,
//! tracing), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::run_server;
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
