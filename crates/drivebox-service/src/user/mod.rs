//! User accounts and authentication flows.

pub mod service;

pub use service::{LoginResult, StorageUsage, UserService};
