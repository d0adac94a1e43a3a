//! # drivebox-storage
//!
//! Blob storage backends for DriveBox. The [`LocalBlobStore`] keeps file
//! bytes on the local filesystem and serves them under a configured
//! public base URL.

pub mod local;

pub use local::LocalBlobStore;
