//! Sharing entities.

pub mod model;

pub use model::{CreateSharedItem, SharePermission, ShareTarget, SharedItem};
