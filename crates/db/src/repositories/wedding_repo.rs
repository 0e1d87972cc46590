//! Repository for the `weddings` table.

use async_trait::async_trait;
use vows_core::types::DbId;

use super::PgStore;
use crate::models::wedding::{CreateWedding, UpdateWedding, Wedding};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, couple_names, city, venue, date, description, cover_photo_url, \
                       is_published, created_at, updated_at";

#[async_trait]
pub trait WeddingRepo: Send + Sync {
    /// Insert a new (unpublished) wedding, returning the created row.
    async fn create(&self, input: &CreateWedding) -> Result<Wedding, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Wedding>, sqlx::Error>;

    /// All weddings, most recently created first.
    async fn list(&self) -> Result<Vec<Wedding>, sqlx::Error>;

    /// Published weddings, most recently created first.
    async fn list_published(&self) -> Result<Vec<Wedding>, sqlx::Error>;

    /// Update a wedding. Only non-`None` fields in `input` are applied.
    async fn update(&self, id: DbId, input: &UpdateWedding) -> Result<Option<Wedding>, sqlx::Error>;

    async fn set_published(&self, id: DbId, is_published: bool) -> Result<Option<Wedding>, sqlx::Error>;

    /// Overwrite the cover reference with `url`.
    async fn set_cover(&self, id: DbId, url: &str) -> Result<Option<Wedding>, sqlx::Error>;

    /// Delete a wedding and (by cascade) its photo rows. Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    async fn count(&self) -> Result<i64, sqlx::Error>;
}

#[async_trait]
impl WeddingRepo for PgStore {
    async fn create(&self, input: &CreateWedding) -> Result<Wedding, sqlx::Error> {
        let query = format!(
            "INSERT INTO weddings (couple_names, city, venue, date, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Wedding>(&query)
            .bind(&input.couple_names)
            .bind(&input.city)
            .bind(&input.venue)
            .bind(&input.date)
            .bind(&input.description)
            .fetch_one(self.pool())
            .await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Wedding>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM weddings WHERE id = $1");
        sqlx::query_as::<_, Wedding>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
    }

    async fn list(&self) -> Result<Vec<Wedding>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM weddings ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Wedding>(&query)
            .fetch_all(self.pool())
            .await
    }

    async fn list_published(&self) -> Result<Vec<Wedding>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM weddings WHERE is_published = true
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Wedding>(&query)
            .fetch_all(self.pool())
            .await
    }

    async fn update(&self, id: DbId, input: &UpdateWedding) -> Result<Option<Wedding>, sqlx::Error> {
        let query = format!(
            "UPDATE weddings SET
                couple_names = COALESCE($2, couple_names),
                city = COALESCE($3, city),
                venue = COALESCE($4, venue),
                date = COALESCE($5, date),
                description = COALESCE($6, description),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Wedding>(&query)
            .bind(id)
            .bind(&input.couple_names)
            .bind(&input.city)
            .bind(&input.venue)
            .bind(&input.date)
            .bind(&input.description)
            .fetch_optional(self.pool())
            .await
    }

    async fn set_published(&self, id: DbId, is_published: bool) -> Result<Option<Wedding>, sqlx::Error> {
        let query = format!(
            "UPDATE weddings SET is_published = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Wedding>(&query)
            .bind(id)
            .bind(is_published)
            .fetch_optional(self.pool())
            .await
    }

    async fn set_cover(&self, id: DbId, url: &str) -> Result<Option<Wedding>, sqlx::Error> {
        let query = format!(
            "UPDATE weddings SET cover_photo_url = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Wedding>(&query)
            .bind(id)
            .bind(url)
            .fetch_optional(self.pool())
            .await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM weddings WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM weddings")
            .fetch_one(self.pool())
            .await
    }
}
