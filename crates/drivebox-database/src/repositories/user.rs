//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use drivebox_core::error::{AppError, ErrorKind};
use drivebox_core::result::AppResult;
use drivebox_entity::user::model::{CreateUser, User};

/// Repository for user accounts and storage accounting.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Create a new user account.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash) \
             VALUES ($1, LOWER($2), $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_email_key") =>
            {
                AppError::conflict(format!("Email '{}' is already registered", data.email))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Update a user's display name.
    pub async fn update_name(&self, id: Uuid, name: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))
    }

    /// Atomically reserve `bytes` of storage against `quota`.
    ///
    /// Returns `false` without modifying the row when the reservation
    /// would push usage past the quota.
    pub async fn try_reserve_storage(
        &self,
        id: Uuid,
        bytes: i64,
        quota: i64,
    ) -> AppResult<bool> {
        let updated: Option<i64> = sqlx::query_scalar(
            "UPDATE users SET used_storage = used_storage + $2, updated_at = NOW() \
             WHERE id = $1 AND used_storage + $2 <= $3 RETURNING used_storage",
        )
        .bind(id)
        .bind(bytes)
        .bind(quota)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reserve storage", e))?;

        Ok(updated.is_some())
    }

    /// Release `bytes` of previously accounted storage, clamping at zero.
    pub async fn release_storage(&self, id: Uuid, bytes: i64) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET used_storage = GREATEST(used_storage - $2, 0), \
             updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(bytes)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to release storage", e))?;

        Ok(())
    }
}
