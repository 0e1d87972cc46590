//! Repository for the `portfolio_videos` table.

use async_trait::async_trait;
use vows_core::types::DbId;

use super::PgStore;
use crate::models::video::{CreateVideo, PortfolioVideo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, youtube_url, title, sort_order, created_at";

#[async_trait]
pub trait VideoRepo: Send + Sync {
    /// Insert a video. A missing `sort_order` appends after the existing videos.
    async fn create(&self, input: &CreateVideo) -> Result<PortfolioVideo, sqlx::Error>;

    /// All videos ordered by `sort_order`.
    async fn list(&self) -> Result<Vec<PortfolioVideo>, sqlx::Error>;

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;
}

#[async_trait]
impl VideoRepo for PgStore {
    async fn create(&self, input: &CreateVideo) -> Result<PortfolioVideo, sqlx::Error> {
        let query = format!(
            "INSERT INTO portfolio_videos (youtube_url, title, sort_order)
             VALUES ($1, $2, COALESCE($3, (SELECT COUNT(*)::INT FROM portfolio_videos)))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PortfolioVideo>(&query)
            .bind(&input.youtube_url)
            .bind(&input.title)
            .bind(input.sort_order)
            .fetch_one(self.pool())
            .await
    }

    async fn list(&self) -> Result<Vec<PortfolioVideo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM portfolio_videos ORDER BY sort_order ASC, id ASC");
        sqlx::query_as::<_, PortfolioVideo>(&query)
            .fetch_all(self.pool())
            .await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM portfolio_videos WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
