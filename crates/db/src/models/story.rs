//! Wedding story model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vows_core::types::{DbId, Timestamp};

/// A row from the `stories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Story {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub city: Option<String>,
    pub venue: Option<String>,
    pub wedding_date: Option<String>,
    pub content: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a story. The slug is derived from the title when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStory {
    pub title: String,
    pub slug: Option<String>,
    pub city: Option<String>,
    pub venue: Option<String>,
    pub wedding_date: Option<String>,
    pub content: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}
