//! Share invitation lifecycle: create, redeem, list, revoke.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_database::repositories::file::FileRepository;
use drivebox_database::repositories::folder::FolderRepository;
use drivebox_database::repositories::share::ShareRepository;
use drivebox_entity::share::model::{
    CreateSharedItem, SharePermission, ShareTarget, SharedItem,
};

use crate::context::RequestContext;

/// Request to share an item with another user.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateShareRequest {
    /// The file or folder to share.
    pub target: ShareTarget,
    /// Recipient email address.
    pub email: String,
    /// Permission level to grant.
    pub permission: SharePermission,
}

/// A share joined with the name of the item it points at.
///
/// The name is `None` when the item has since been purged; purges clean
/// up shares in the same transaction, so this is a read-skew corner, not
/// a steady state.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ShareWithItem {
    /// The share itself.
    #[serde(flatten)]
    pub share: SharedItem,
    /// Current name of the shared item.
    pub item_name: Option<String>,
}

/// Manages share invitations.
#[derive(Debug, Clone)]
pub struct ShareService {
    share_repo: Arc<ShareRepository>,
    file_repo: Arc<FileRepository>,
    folder_repo: Arc<FolderRepository>,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        share_repo: Arc<ShareRepository>,
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
    ) -> Self {
        Self {
            share_repo,
            file_repo,
            folder_repo,
        }
    }

    /// Current name of a share target, if the item still exists.
    async fn item_name(&self, target: ShareTarget) -> AppResult<Option<String>> {
        Ok(match target {
            ShareTarget::File(id) => self.file_repo.find_by_id(id).await?.map(|f| f.name),
            ShareTarget::Folder(id) => self.folder_repo.find_by_id(id).await?.map(|f| f.name),
        })
    }

    async fn with_item(&self, share: SharedItem) -> AppResult<ShareWithItem> {
        let item_name = self.item_name(share.target()).await?;
        Ok(ShareWithItem { share, item_name })
    }

    /// Creates a share invitation for a file or folder the user owns.
    pub async fn create_share(
        &self,
        ctx: &RequestContext,
        request: CreateShareRequest,
    ) -> AppResult<SharedItem> {
        let email = request.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("A valid recipient email is required"));
        }
        if email == ctx.email {
            return Err(AppError::validation("You cannot share an item with yourself"));
        }

        // Only the owner may share; foreign items read as missing.
        match request.target {
            ShareTarget::File(id) => {
                let file = self
                    .file_repo
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| AppError::not_found("File not found"))?;
                if file.owner_id != ctx.user_id {
                    return Err(AppError::not_found("File not found"));
                }
            }
            ShareTarget::Folder(id) => {
                let folder = self
                    .folder_repo
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Folder not found"))?;
                if folder.owner_id != ctx.user_id {
                    return Err(AppError::not_found("Folder not found"));
                }
                if folder.is_root {
                    return Err(AppError::validation("The root folder cannot be shared"));
                }
            }
        }

        if self
            .share_repo
            .exists_for_target(request.target.item_type(), request.target.item_id(), &email)
            .await?
        {
            return Err(AppError::conflict("Item is already shared with this user"));
        }

        let share = self
            .share_repo
            .create(&CreateSharedItem {
                target: request.target,
                owner_id: ctx.user_id,
                shared_with_email: email.clone(),
                permission: request.permission,
                token: Uuid::new_v4().to_string(),
                expires_at: SharedItem::default_expiry(),
            })
            .await?;

        info!(
            share_id = %share.id,
            item_id = %share.item_id,
            recipient = %email,
            user_id = %ctx.user_id,
            "Share invitation created"
        );
        Ok(share)
    }

    /// Looks up a pending invitation by token.
    ///
    /// Expiry is checked before anything else about the caller: an
    /// expired invitation is 410 for everyone.
    pub async fn get_invitation(&self, token: &str) -> AppResult<ShareWithItem> {
        let share = self
            .share_repo
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Invitation not found"))?;

        if share.is_expired() {
            return Err(AppError::gone("This invitation has expired"));
        }

        self.with_item(share).await
    }

    /// Redeems an invitation for the current user.
    pub async fn accept_invitation(
        &self,
        ctx: &RequestContext,
        token: &str,
    ) -> AppResult<SharedItem> {
        let share = self
            .share_repo
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Invitation not found"))?;

        if share.is_expired() {
            return Err(AppError::gone("This invitation has expired"));
        }
        if share.shared_with_email != ctx.email {
            return Err(AppError::forbidden(
                "This invitation was sent to a different email address",
            ));
        }

        let accepted = self
            .share_repo
            .accept(share.id)
            .await?
            .ok_or_else(|| AppError::not_found("Invitation not found"))?;

        info!(share_id = %accepted.id, user_id = %ctx.user_id, "Share invitation accepted");
        Ok(accepted)
    }

    /// Fetches a single share. Visible to the sharer and the recipient.
    pub async fn get_share(&self, ctx: &RequestContext, id: Uuid) -> AppResult<ShareWithItem> {
        let share = self
            .share_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))?;

        if share.owner_id != ctx.user_id && share.shared_with_email != ctx.email {
            return Err(AppError::not_found("Share not found"));
        }

        self.with_item(share).await
    }

    /// Changes a share's permission level. Only the sharer may do this.
    pub async fn update_permission(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        permission: SharePermission,
    ) -> AppResult<SharedItem> {
        let share = self
            .share_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))?;

        if share.owner_id != ctx.user_id {
            return Err(AppError::forbidden(
                "Only the sharer can change a share's permission",
            ));
        }

        let updated = self
            .share_repo
            .update_permission(id, permission)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))?;

        info!(
            share_id = %id,
            permission = ?permission,
            user_id = %ctx.user_id,
            "Share permission updated"
        );
        Ok(updated)
    }

    /// Lists every share of one item.
    ///
    /// Visible to the item's owner and to anyone holding a share of it.
    pub async fn list_for_item(
        &self,
        ctx: &RequestContext,
        target: ShareTarget,
    ) -> AppResult<Vec<ShareWithItem>> {
        let shares = self
            .share_repo
            .find_by_target(target.item_type(), target.item_id())
            .await?;

        let owns = match target {
            ShareTarget::File(id) => self
                .file_repo
                .find_by_id(id)
                .await?
                .is_some_and(|f| f.owner_id == ctx.user_id),
            ShareTarget::Folder(id) => self
                .folder_repo
                .find_by_id(id)
                .await?
                .is_some_and(|f| f.owner_id == ctx.user_id),
        };
        let holds_share = shares.iter().any(|s| s.shared_with_email == ctx.email);
        if !owns && !holds_share {
            return Err(AppError::not_found("Item not found"));
        }

        let mut out = Vec::with_capacity(shares.len());
        for share in shares {
            out.push(self.with_item(share).await?);
        }
        Ok(out)
    }

    /// Lists shares the user has created, pending and accepted.
    pub async fn list_created(&self, ctx: &RequestContext) -> AppResult<Vec<ShareWithItem>> {
        let shares = self.share_repo.find_by_owner(ctx.user_id).await?;
        let mut out = Vec::with_capacity(shares.len());
        for share in shares {
            out.push(self.with_item(share).await?);
        }
        Ok(out)
    }

    /// Lists accepted shares addressed to the user.
    pub async fn list_received(&self, ctx: &RequestContext) -> AppResult<Vec<ShareWithItem>> {
        let shares = self.share_repo.find_accepted_for_email(&ctx.email).await?;
        let mut out = Vec::with_capacity(shares.len());
        for share in shares {
            out.push(self.with_item(share).await?);
        }
        Ok(out)
    }

    /// Revokes a share. Allowed for the sharer and for the recipient.
    pub async fn revoke(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let share = self
            .share_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))?;

        let is_sharer = share.owner_id == ctx.user_id;
        let is_recipient = share.shared_with_email == ctx.email;
        if !is_sharer && !is_recipient {
            return Err(AppError::forbidden("You cannot revoke this share"));
        }

        self.share_repo.delete(id).await?;
        info!(share_id = %id, user_id = %ctx.user_id, "Share revoked");
        Ok(())
    }
}
