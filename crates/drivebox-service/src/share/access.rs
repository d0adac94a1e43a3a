//! Share-based access resolution.

use std::sync::Arc;

use drivebox_core::result::AppResult;
use drivebox_database::repositories::share::ShareRepository;
use drivebox_entity::share::model::ShareTarget;

use crate::context::RequestContext;

/// Decides whether a non-owner may access an item through a share.
///
/// Access is granted only by an accepted share of the exact item; a
/// share of a folder does not extend to the files or folders inside it.
#[derive(Debug, Clone)]
pub struct AccessService {
    share_repo: Arc<ShareRepository>,
}

impl AccessService {
    /// Creates a new access service.
    pub fn new(share_repo: Arc<ShareRepository>) -> Self {
        Self { share_repo }
    }

    /// Whether the current user holds an accepted share of the item.
    pub async fn can_access(&self, ctx: &RequestContext, target: ShareTarget) -> AppResult<bool> {
        self.share_repo
            .has_accepted_share(target.item_type(), target.item_id(), &ctx.email)
            .await
    }
}
