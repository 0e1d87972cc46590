//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Back-office quote list filter (`?search=&status=`).
///
/// `status` accepts `all` or one of the quote status names.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteListParams {
    pub search: Option<String>,
    pub status: Option<String>,
}

/// Contact link selection (`?plan=`). Without a plan the general link is returned.
#[derive(Debug, Default, Deserialize)]
pub struct ContactLinkParams {
    pub plan: Option<String>,
}
