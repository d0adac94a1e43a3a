//! # drivebox-core
//!
//! Shared foundation for DriveBox: configuration schemas, the unified
//! error type, and the blob-store collaborator trait.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
