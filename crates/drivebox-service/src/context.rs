//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Extracted by middleware and passed into service methods so that
/// every operation knows *who* is acting. Share resolution keys on the
/// email, so it travels alongside the user ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's email (lowercased, from JWT claims).
    pub email: String,
    /// The user's display name (convenience field from JWT claims).
    pub name: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, email: String, name: String) -> Self {
        Self {
            user_id,
            email: email.to_lowercase(),
            name,
            request_time: Utc::now(),
        }
    }
}
