//! Repository for the `user_sessions` table.

use async_trait::async_trait;
use vows_core::types::DbId;

use super::PgStore;
use crate::models::session::{CreateSession, UserSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, refresh_token_hash, expires_at, is_revoked, created_at, updated_at";

#[async_trait]
pub trait SessionRepo: Send + Sync {
    async fn create(&self, input: &CreateSession) -> Result<UserSession, sqlx::Error>;

    /// Find a session by refresh token hash that is neither revoked nor expired.
    async fn find_active_by_hash(&self, hash: &str) -> Result<Option<UserSession>, sqlx::Error>;

    /// Revoke a single session. Returns `true` if the row was updated.
    async fn revoke(&self, id: DbId) -> Result<bool, sqlx::Error>;

    /// Revoke all active sessions for a user. Returns the count of revoked sessions.
    async fn revoke_all_for_user(&self, user_id: DbId) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl SessionRepo for PgStore {
    async fn create(&self, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .fetch_one(self.pool())
            .await
    }

    async fn find_active_by_hash(&self, hash: &str) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE refresh_token_hash = $1
               AND is_revoked = false
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(hash)
            .fetch_optional(self.pool())
            .await
    }

    async fn revoke(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true, updated_at = NOW()
             WHERE id = $1 AND is_revoked = false",
        )
        .bind(id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn revoke_all_for_user(&self, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true, updated_at = NOW()
             WHERE user_id = $1 AND is_revoked = false",
        )
        .bind(user_id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected())
    }
}
