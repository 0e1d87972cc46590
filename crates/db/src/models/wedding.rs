//! Wedding entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vows_core::types::{DbId, Timestamp};

use crate::models::non_blank;
use crate::models::photo::WeddingPhoto;

/// A wedding row from the `weddings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Wedding {
    pub id: DbId,
    pub couple_names: String,
    pub city: Option<String>,
    pub venue: Option<String>,
    /// Free-text date as typed by the studio.
    pub date: Option<String>,
    pub description: Option<String>,
    /// Copy of one photo's public URL. Not cleared when that photo is deleted.
    pub cover_photo_url: Option<String>,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A wedding together with its gallery, ordered by `sort_order`.
#[derive(Debug, Clone, Serialize)]
pub struct WeddingWithPhotos {
    #[serde(flatten)]
    pub wedding: Wedding,
    pub photos: Vec<WeddingPhoto>,
}

/// DTO for creating a new wedding.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWedding {
    pub couple_names: String,
    pub city: Option<String>,
    pub venue: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

impl CreateWedding {
    /// Trim the couple names and store blank optional fields as NULL.
    pub fn normalized(self) -> Self {
        Self {
            couple_names: self.couple_names.trim().to_string(),
            city: non_blank(self.city),
            venue: non_blank(self.venue),
            date: non_blank(self.date),
            description: non_blank(self.description),
        }
    }
}

/// DTO for updating an existing wedding. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWedding {
    pub couple_names: Option<String>,
    pub city: Option<String>,
    pub venue: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}
