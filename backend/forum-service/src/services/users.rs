/// User directory - resolves usernames to users, creating them on first login
use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::metrics::forum::LOGINS_TOTAL;
use crate::models::User;
use crate::SERVICE_NAME;
use db_pool::acquire_with_metrics;
use sqlx::SqlitePool;

pub struct UserDirectory {
    pool: SqlitePool,
}

impl UserDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Look up a user by username, creating a non-moderator on first sight.
    ///
    /// The username is trimmed and matched exactly (case-sensitive). Two
    /// concurrent first logins race on the `users.username` unique constraint;
    /// the loser re-reads the winner's row. If that row is still not visible the
    /// conflict is returned and the client is expected to retry.
    pub async fn resolve_or_create(&self, username: &str) -> Result<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::Validation("Username cannot be empty".to_string()));
        }

        let mut conn = acquire_with_metrics(&self.pool, SERVICE_NAME).await?;

        if let Some(user) = user_repo::find_by_username(&mut conn, username).await? {
            LOGINS_TOTAL.with_label_values(&["existing"]).inc();
            tracing::debug!(user_id = user.id, "login resolved existing user");
            return Ok(user);
        }

        match user_repo::insert_user(&mut conn, username, false).await {
            Ok(user) => {
                LOGINS_TOTAL.with_label_values(&["created"]).inc();
                tracing::info!(user_id = user.id, username = %user.username, "created user on first login");
                Ok(user)
            }
            Err(err) => {
                let err = AppError::from(err);
                if !err.is_conflict() {
                    return Err(err);
                }

                match user_repo::find_by_username(&mut conn, username).await? {
                    Some(user) => {
                        LOGINS_TOTAL.with_label_values(&["existing"]).inc();
                        tracing::debug!(user_id = user.id, "concurrent login created user first");
                        Ok(user)
                    }
                    None => {
                        LOGINS_TOTAL.with_label_values(&["conflict"]).inc();
                        tracing::warn!(%username, "username conflict without visible row");
                        Err(err)
                    }
                }
            }
        }
    }

    /// Fetch a user by ID
    pub async fn find_user(&self, user_id: i64) -> Result<User> {
        let mut conn = acquire_with_metrics(&self.pool, SERVICE_NAME).await?;
        user_repo::find_by_id(&mut conn, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))
    }

    /// Moderator flag of an existing user
    pub async fn is_moderator(&self, user_id: i64) -> Result<bool> {
        let mut conn = acquire_with_metrics(&self.pool, SERVICE_NAME).await?;
        user_repo::moderator_flag(&mut conn, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))
    }
}
