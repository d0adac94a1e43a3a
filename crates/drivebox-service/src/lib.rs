//! # drivebox-service
//!
//! Business logic service layer for DriveBox. Each service orchestrates
//! repositories, the blob store, and authentication to implement
//! application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod blob;
pub mod context;
pub mod file;
pub mod folder;
pub mod search;
pub mod share;
pub mod trash;
pub mod user;

pub use blob::BlobClient;
pub use context::RequestContext;
pub use file::FileService;
pub use folder::FolderService;
pub use search::SearchService;
pub use share::{AccessService, ShareService};
pub use trash::TrashService;
pub use user::UserService;
