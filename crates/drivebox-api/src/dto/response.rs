//! Response envelope shared by all endpoints.

use serde::Serialize;

/// Standard success envelope: `{ "success": true, "data": ... }`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Always true for success responses.
    pub success: bool,
    /// The payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wraps a payload in the success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
