//! Repository for the `blog_posts` table.

use async_trait::async_trait;
use vows_core::publication::PublishChange;
use vows_core::types::DbId;

use super::PgStore;
use crate::models::blog_post::{BlogPost, CreateBlogPost};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, excerpt, content, seo_title, seo_description, \
                       is_published, published_at, created_at, updated_at";

#[async_trait]
pub trait BlogPostRepo: Send + Sync {
    /// Insert an unpublished post under `slug`. A taken slug violates `uq_blog_posts_slug`.
    async fn create(&self, slug: &str, input: &CreateBlogPost) -> Result<BlogPost, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<BlogPost>, sqlx::Error>;

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, sqlx::Error>;

    /// All posts, most recently created first.
    async fn list(&self) -> Result<Vec<BlogPost>, sqlx::Error>;

    /// Published posts, most recently published first.
    async fn list_published(&self) -> Result<Vec<BlogPost>, sqlx::Error>;

    /// Write a publish toggle. `published_at` is only touched when the change carries one.
    async fn set_published(&self, id: DbId, change: PublishChange) -> Result<Option<BlogPost>, sqlx::Error>;

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;
}

#[async_trait]
impl BlogPostRepo for PgStore {
    async fn create(&self, slug: &str, input: &CreateBlogPost) -> Result<BlogPost, sqlx::Error> {
        let query = format!(
            "INSERT INTO blog_posts (title, slug, excerpt, content, seo_title, seo_description)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.seo_title)
            .bind(&input.seo_description)
            .fetch_one(self.pool())
            .await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE id = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE slug = $1 AND is_published = true");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(slug)
            .fetch_optional(self.pool())
            .await
    }

    async fn list(&self) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, BlogPost>(&query)
            .fetch_all(self.pool())
            .await
    }

    async fn list_published(&self) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts WHERE is_published = true
             ORDER BY published_at DESC NULLS LAST, id DESC"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .fetch_all(self.pool())
            .await
    }

    async fn set_published(&self, id: DbId, change: PublishChange) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET
                is_published = $2,
                published_at = COALESCE($3, published_at),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .bind(change.is_published)
            .bind(change.published_at)
            .fetch_optional(self.pool())
            .await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
