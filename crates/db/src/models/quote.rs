//! Quote (inquiry) model.

use serde::Serialize;
use sqlx::FromRow;
use vows_core::inquiry::{QuoteFields, QuoteStatus};
use vows_core::types::{DbId, Timestamp};

/// A row from the `quotes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quote {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    pub wedding_date: Option<String>,
    pub city: Option<String>,
    pub message: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: QuoteStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Quote {
    /// Borrow the fields the back-office filter searches.
    pub fn fields(&self) -> QuoteFields<'_> {
        QuoteFields {
            name: &self.name,
            phone: &self.phone,
            wedding_date: self.wedding_date.as_deref(),
            city: self.city.as_deref(),
            status: self.status,
        }
    }
}
