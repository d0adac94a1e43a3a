//! Blob storage configuration.

use serde::{Deserialize, Serialize};

/// Per-file upload ceiling: 10 MiB.
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Per-user aggregate storage quota: 100 MiB.
pub const USER_QUOTA_BYTES: u64 = 100 * 1024 * 1024;

/// Top-level blob storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for locally stored blobs.
    #[serde(default = "default_data_root")]
    pub data_root: String,
    /// Base URL under which stored blobs are publicly served.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Maximum size of a single uploaded file in bytes.
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Aggregate storage quota per user in bytes.
    #[serde(default = "default_user_quota")]
    pub user_quota_bytes: u64,
    /// Timeout applied to every blob-store call in seconds.
    #[serde(default = "default_operation_timeout")]
    pub operation_timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            public_base_url: default_public_base_url(),
            max_upload_size_bytes: default_max_upload(),
            user_quota_bytes: default_user_quota(),
            operation_timeout_seconds: default_operation_timeout(),
        }
    }
}

fn default_data_root() -> String {
    "./data/blobs".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080/blobs".to_string()
}

fn default_max_upload() -> u64 {
    MAX_FILE_SIZE_BYTES
}

fn default_user_quota() -> u64 {
    USER_QUOTA_BYTES
}

fn default_operation_timeout() -> u64 {
    15
}
