//! Portfolio video model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vows_core::types::{DbId, Timestamp};
use vows_core::video;

/// A row from the `portfolio_videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PortfolioVideo {
    pub id: DbId,
    pub youtube_url: String,
    pub title: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

impl PortfolioVideo {
    pub fn youtube_id(&self) -> Option<&str> {
        video::youtube_id(&self.youtube_url)
    }
}

/// A video with the identifiers the site needs to embed it.
#[derive(Debug, Clone, Serialize)]
pub struct VideoView {
    #[serde(flatten)]
    pub video: PortfolioVideo,
    pub youtube_id: Option<String>,
    pub thumbnail_url: Option<String>,
    pub embed_url: Option<String>,
}

impl From<PortfolioVideo> for VideoView {
    fn from(row: PortfolioVideo) -> Self {
        let id = row.youtube_id().map(str::to_string);
        Self {
            thumbnail_url: id.as_deref().map(video::thumbnail_url),
            embed_url: id.as_deref().map(video::embed_url),
            youtube_id: id,
            video: row,
        }
    }
}

/// DTO for adding a video. Appended at the end when `sort_order` is omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideo {
    pub youtube_url: String,
    pub title: Option<String>,
    pub sort_order: Option<i32>,
}
