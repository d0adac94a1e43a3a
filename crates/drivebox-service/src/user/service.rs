//! Registration, login, profile, and storage accounting.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use drivebox_auth::jwt::JwtEncoder;
use drivebox_auth::password::PasswordHasher;
use drivebox_core::config::auth::AuthConfig;
use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_database::repositories::folder::FolderRepository;
use drivebox_database::repositories::user::UserRepository;
use drivebox_entity::folder::model::{CreateFolder, Folder};
use drivebox_entity::user::model::{CreateUser, User};

use crate::context::RequestContext;

/// Name given to every user's root folder.
const ROOT_FOLDER_NAME: &str = "My Drive";

/// Result of a successful registration or login.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoginResult {
    /// The authenticated user.
    pub user: User,
    /// Signed JWT access token.
    pub access_token: String,
}

/// A user's storage accounting snapshot.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct StorageUsage {
    /// Bytes currently attributed to the user.
    pub used_storage: i64,
    /// The configured quota in bytes.
    pub quota: i64,
    /// Bytes remaining before the quota is hit.
    pub remaining: i64,
}

/// Manages user accounts.
#[derive(Debug, Clone)]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    folder_repo: Arc<FolderRepository>,
    hasher: PasswordHasher,
    jwt: JwtEncoder,
    password_min_length: usize,
    quota: i64,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        folder_repo: Arc<FolderRepository>,
        hasher: PasswordHasher,
        jwt: JwtEncoder,
        auth_config: &AuthConfig,
        quota: i64,
    ) -> Self {
        Self {
            user_repo,
            folder_repo,
            hasher,
            jwt,
            password_min_length: auth_config.password_min_length,
            quota,
        }
    }

    /// Registers a new account and signs the user in.
    ///
    /// Every account gets a root folder; all other folders and files hang
    /// below it.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> AppResult<LoginResult> {
        let name = name.trim();
        let email = email.trim().to_lowercase();
        if name.is_empty() {
            return Err(AppError::validation("Name must not be empty"));
        }
        if !email.contains('@') {
            return Err(AppError::validation("A valid email address is required"));
        }
        if password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                name: name.to_string(),
                email,
                password_hash,
            })
            .await?;

        self.ensure_root_folder(user.id).await?;

        let access_token = self
            .jwt
            .generate_access_token(user.id, &user.email, &user.name)?;

        info!(user_id = %user.id, "User registered");
        Ok(LoginResult { user, access_token })
    }

    /// Authenticates a user by email and password.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResult> {
        // A missing account and a wrong password read the same.
        let user = self
            .user_repo
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let access_token = self
            .jwt
            .generate_access_token(user.id, &user.email, &user.name)?;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginResult { user, access_token })
    }

    /// Returns the user's root folder, creating it if missing.
    pub async fn ensure_root_folder(&self, user_id: Uuid) -> AppResult<Folder> {
        if let Some(root) = self.folder_repo.find_root(user_id).await? {
            return Ok(root);
        }

        self.folder_repo
            .create(&CreateFolder {
                name: ROOT_FOLDER_NAME.to_string(),
                owner_id: user_id,
                parent_id: None,
                is_root: true,
            })
            .await
    }

    /// Current user's profile.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))
    }

    /// Updates the current user's display name.
    pub async fn update_profile(&self, ctx: &RequestContext, name: &str) -> AppResult<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Name must not be empty"));
        }

        self.user_repo
            .update_name(ctx.user_id, name)
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))
    }

    /// Current storage usage against the configured quota.
    pub async fn storage_usage(&self, ctx: &RequestContext) -> AppResult<StorageUsage> {
        let user = self.profile(ctx).await?;
        Ok(StorageUsage {
            used_storage: user.used_storage,
            quota: self.quota,
            remaining: user.remaining_storage(self.quota),
        })
    }
}
