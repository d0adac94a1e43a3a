//! Repository implementations for all DriveBox entities.

pub mod file;
pub mod folder;
pub mod share;
pub mod trash;
pub mod user;

pub use file::FileRepository;
pub use folder::FolderRepository;
pub use share::ShareRepository;
pub use trash::TrashRepository;
pub use user::UserRepository;
