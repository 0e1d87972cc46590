//! Repository for the `reserved_dates` table.

use async_trait::async_trait;
use vows_core::types::DbId;

use super::PgStore;
use crate::models::reserved_date::{CreateReservedDate, ReservedDate};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, date, couple_names, notes, created_at";

#[async_trait]
pub trait ReservedDateRepo: Send + Sync {
    /// Reserve a date. Reserving the same date twice violates `uq_reserved_dates_date`.
    async fn create(&self, input: &CreateReservedDate) -> Result<ReservedDate, sqlx::Error>;

    /// All reserved dates in calendar order.
    async fn list(&self) -> Result<Vec<ReservedDate>, sqlx::Error>;

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    async fn count(&self) -> Result<i64, sqlx::Error>;
}

#[async_trait]
impl ReservedDateRepo for PgStore {
    async fn create(&self, input: &CreateReservedDate) -> Result<ReservedDate, sqlx::Error> {
        let query = format!(
            "INSERT INTO reserved_dates (date, couple_names, notes)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReservedDate>(&query)
            .bind(input.date)
            .bind(&input.couple_names)
            .bind(&input.notes)
            .fetch_one(self.pool())
            .await
    }

    async fn list(&self) -> Result<Vec<ReservedDate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reserved_dates ORDER BY date ASC");
        sqlx::query_as::<_, ReservedDate>(&query)
            .fetch_all(self.pool())
            .await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reserved_dates WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM reserved_dates")
            .fetch_one(self.pool())
            .await
    }
}
