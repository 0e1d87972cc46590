//! Repository for the `users` table.

use async_trait::async_trait;
use vows_core::types::DbId;

use super::PgStore;
use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, role, created_at, updated_at";

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Insert a user. A taken email violates `uq_users_email`.
    async fn create(&self, input: &CreateUser) -> Result<User, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, sqlx::Error>;

    /// Look up a user by (lower-cased) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;

    /// All users, oldest first.
    async fn list(&self) -> Result<Vec<User>, sqlx::Error>;

    async fn set_role(&self, id: DbId, role: &str) -> Result<Option<User>, sqlx::Error>;
}

#[async_trait]
impl UserRepo for PgStore {
    async fn create(&self, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(self.pool())
            .await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(self.pool())
            .await
    }

    async fn list(&self) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id ASC");
        sqlx::query_as::<_, User>(&query)
            .fetch_all(self.pool())
            .await
    }

    async fn set_role(&self, id: DbId, role: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET role = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(role)
            .fetch_optional(self.pool())
            .await
    }
}
