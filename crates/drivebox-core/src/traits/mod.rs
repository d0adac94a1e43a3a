//! Core trait definitions shared across crates.

pub mod blob;

pub use blob::{BlobStore, StoredBlob};
