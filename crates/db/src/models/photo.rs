//! Wedding photo model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vows_core::types::{DbId, Timestamp};

/// A photo row from the `wedding_photos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WeddingPhoto {
    pub id: DbId,
    pub wedding_id: DbId,
    /// Object storage key, used to remove the file.
    pub storage_path: String,
    pub url: String,
    pub caption: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// DTO for inserting a photo after its file has been stored.
#[derive(Debug, Clone)]
pub struct CreatePhoto {
    pub wedding_id: DbId,
    pub storage_path: String,
    pub url: String,
    pub caption: Option<String>,
    pub sort_order: i32,
}

/// DTO for editing a photo's caption or display position.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePhoto {
    pub caption: Option<String>,
    pub sort_order: Option<i32>,
}
