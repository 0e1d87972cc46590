//! Repository for the `wedding_photos` table.

use async_trait::async_trait;
use vows_core::types::DbId;

use super::PgStore;
use crate::models::photo::{CreatePhoto, UpdatePhoto, WeddingPhoto};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, wedding_id, storage_path, url, caption, sort_order, created_at";

#[async_trait]
pub trait PhotoRepo: Send + Sync {
    async fn create(&self, input: &CreatePhoto) -> Result<WeddingPhoto, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<WeddingPhoto>, sqlx::Error>;

    /// Photos of one wedding ordered by `sort_order`, then insertion.
    async fn list_by_wedding(&self, wedding_id: DbId) -> Result<Vec<WeddingPhoto>, sqlx::Error>;

    async fn count_by_wedding(&self, wedding_id: DbId) -> Result<i64, sqlx::Error>;

    /// Update caption and/or position. Only non-`None` fields are applied.
    async fn update(&self, id: DbId, input: &UpdatePhoto) -> Result<Option<WeddingPhoto>, sqlx::Error>;

    /// Delete a photo row, returning it so its stored file can be removed.
    async fn delete(&self, id: DbId) -> Result<Option<WeddingPhoto>, sqlx::Error>;
}

#[async_trait]
impl PhotoRepo for PgStore {
    async fn create(&self, input: &CreatePhoto) -> Result<WeddingPhoto, sqlx::Error> {
        let query = format!(
            "INSERT INTO wedding_photos (wedding_id, storage_path, url, caption, sort_order)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WeddingPhoto>(&query)
            .bind(input.wedding_id)
            .bind(&input.storage_path)
            .bind(&input.url)
            .bind(&input.caption)
            .bind(input.sort_order)
            .fetch_one(self.pool())
            .await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<WeddingPhoto>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM wedding_photos WHERE id = $1");
        sqlx::query_as::<_, WeddingPhoto>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
    }

    async fn list_by_wedding(&self, wedding_id: DbId) -> Result<Vec<WeddingPhoto>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM wedding_photos WHERE wedding_id = $1
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, WeddingPhoto>(&query)
            .bind(wedding_id)
            .fetch_all(self.pool())
            .await
    }

    async fn count_by_wedding(&self, wedding_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM wedding_photos WHERE wedding_id = $1")
            .bind(wedding_id)
            .fetch_one(self.pool())
            .await
    }

    async fn update(&self, id: DbId, input: &UpdatePhoto) -> Result<Option<WeddingPhoto>, sqlx::Error> {
        let query = format!(
            "UPDATE wedding_photos SET
                caption = COALESCE($2, caption),
                sort_order = COALESCE($3, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WeddingPhoto>(&query)
            .bind(id)
            .bind(&input.caption)
            .bind(input.sort_order)
            .fetch_optional(self.pool())
            .await
    }

    async fn delete(&self, id: DbId) -> Result<Option<WeddingPhoto>, sqlx::Error> {
        let query = format!("DELETE FROM wedding_photos WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, WeddingPhoto>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
    }
}
