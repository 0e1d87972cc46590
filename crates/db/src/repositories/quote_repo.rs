//! Repository for the `quotes` table.
//!
//! Quotes are never deleted, so there is no delete operation.

use async_trait::async_trait;
use vows_core::inquiry::{QuoteFilter, QuoteStatus, ValidQuote};
use vows_core::types::DbId;

use super::PgStore;
use crate::models::quote::Quote;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, phone, wedding_date, city, message, status, created_at, updated_at";

#[async_trait]
pub trait QuoteRepo: Send + Sync {
    /// Store a validated submission with the initial status.
    async fn create(&self, input: &ValidQuote) -> Result<Quote, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Quote>, sqlx::Error>;

    /// Quotes matching `filter`, newest first.
    async fn list(&self, filter: &QuoteFilter) -> Result<Vec<Quote>, sqlx::Error>;

    async fn update_status(&self, id: DbId, status: QuoteStatus) -> Result<Option<Quote>, sqlx::Error>;
}

/// Wrap a search term in `%` for LIKE, escaping its own wildcards.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl QuoteRepo for PgStore {
    async fn create(&self, input: &ValidQuote) -> Result<Quote, sqlx::Error> {
        let query = format!(
            "INSERT INTO quotes (name, phone, wedding_date, city, message, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.wedding_date)
            .bind(&input.city)
            .bind(&input.message)
            .bind(QuoteStatus::INITIAL.as_str())
            .fetch_one(self.pool())
            .await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Quote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quotes WHERE id = $1");
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
    }

    async fn list(&self, filter: &QuoteFilter) -> Result<Vec<Quote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quotes
             WHERE ($1::TEXT IS NULL OR status = $1)
               AND ($2::TEXT IS NULL
                    OR name ILIKE $2
                    OR city ILIKE $2
                    OR phone LIKE $2
                    OR wedding_date LIKE $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(filter.status.map(QuoteStatus::as_str))
            .bind(filter.search_term().map(like_pattern))
            .fetch_all(self.pool())
            .await
    }

    async fn update_status(&self, id: DbId, status: QuoteStatus) -> Result<Option<Quote>, sqlx::Error> {
        let query = format!(
            "UPDATE quotes SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(self.pool())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ana"), "%ana%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
