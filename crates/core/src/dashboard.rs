//! Back-office dashboard aggregation.

use serde::Serialize;

use crate::inquiry::QuoteStatus;

/// Number of quotes listed under "recent" on the dashboard.
pub const RECENT_QUOTES_LIMIT: usize = 5;

/// Headline counters shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardCounts {
    pub weddings: i64,
    pub reserved_dates: i64,
    pub total_quotes: usize,
    pub new_quotes: usize,
    pub in_conversation_quotes: usize,
    pub closed_quotes: usize,
    pub lost_quotes: usize,
}

impl DashboardCounts {
    /// Tally quote statuses on top of the entity counts.
    pub fn from_statuses(
        weddings: i64,
        reserved_dates: i64,
        statuses: impl IntoIterator<Item = QuoteStatus>,
    ) -> Self {
        let mut counts = Self {
            weddings,
            reserved_dates,
            ..Self::default()
        };
        for status in statuses {
            counts.total_quotes += 1;
            match status {
                QuoteStatus::New => counts.new_quotes += 1,
                QuoteStatus::InConversation => counts.in_conversation_quotes += 1,
                QuoteStatus::Closed => counts.closed_quotes += 1,
                QuoteStatus::Lost => counts.lost_quotes += 1,
            }
        }
        counts
    }
}

/// First [`RECENT_QUOTES_LIMIT`] items of a newest-first list.
pub fn recent<T: Clone>(newest_first: &[T]) -> Vec<T> {
    newest_first
        .iter()
        .take(RECENT_QUOTES_LIMIT)
        .cloned()
        .collect()
}
