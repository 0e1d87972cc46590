//! Repository for the `stories` table.

use async_trait::async_trait;
use vows_core::types::DbId;

use super::PgStore;
use crate::models::story::{CreateStory, Story};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, city, venue, wedding_date, content, seo_title, \
                       seo_description, is_published, created_at, updated_at";

#[async_trait]
pub trait StoryRepo: Send + Sync {
    /// Insert an unpublished story under `slug`. A taken slug violates `uq_stories_slug`.
    async fn create(&self, slug: &str, input: &CreateStory) -> Result<Story, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Story>, sqlx::Error>;

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Story>, sqlx::Error>;

    /// All stories, most recently created first.
    async fn list(&self) -> Result<Vec<Story>, sqlx::Error>;

    async fn list_published(&self) -> Result<Vec<Story>, sqlx::Error>;

    async fn set_published(&self, id: DbId, is_published: bool) -> Result<Option<Story>, sqlx::Error>;

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;
}

#[async_trait]
impl StoryRepo for PgStore {
    async fn create(&self, slug: &str, input: &CreateStory) -> Result<Story, sqlx::Error> {
        let query = format!(
            "INSERT INTO stories
                (title, slug, city, venue, wedding_date, content, seo_title, seo_description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.city)
            .bind(&input.venue)
            .bind(&input.wedding_date)
            .bind(&input.content)
            .bind(&input.seo_title)
            .bind(&input.seo_description)
            .fetch_one(self.pool())
            .await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories WHERE id = $1");
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories WHERE slug = $1 AND is_published = true");
        sqlx::query_as::<_, Story>(&query)
            .bind(slug)
            .fetch_optional(self.pool())
            .await
    }

    async fn list(&self) -> Result<Vec<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Story>(&query)
            .fetch_all(self.pool())
            .await
    }

    async fn list_published(&self) -> Result<Vec<Story>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stories WHERE is_published = true
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Story>(&query)
            .fetch_all(self.pool())
            .await
    }

    async fn set_published(&self, id: DbId, is_published: bool) -> Result<Option<Story>, sqlx::Error> {
        let query = format!(
            "UPDATE stories SET is_published = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .bind(is_published)
            .fetch_optional(self.pool())
            .await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stories WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
