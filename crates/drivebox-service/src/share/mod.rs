//! Sharing and access resolution.

pub mod access;
pub mod service;

pub use access::AccessService;
pub use service::{CreateShareRequest, ShareService, ShareWithItem};
