//! Reserved calendar date model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vows_core::types::{DbId, Timestamp};

/// A row from the `reserved_dates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReservedDate {
    pub id: DbId,
    pub date: NaiveDate,
    pub couple_names: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for reserving a date. `date` is `YYYY-MM-DD`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservedDate {
    pub date: NaiveDate,
    pub couple_names: Option<String>,
    pub notes: Option<String>,
}
