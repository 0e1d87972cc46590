//! Publish-flag toggling for weddings, blog posts and stories.

use crate::types::Timestamp;

/// Whether a content type records when it was published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStamp {
    /// Only the flag flips (weddings, stories).
    FlagOnly,
    /// An unpublished -> published transition also stamps `published_at` (blog posts).
    StampOnPublish,
}

/// The column changes a toggle produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishChange {
    pub is_published: bool,
    /// `Some` when `published_at` must be overwritten; `None` leaves it untouched.
    pub published_at: Option<Timestamp>,
}

/// Flip `currently_published`.
///
/// Unpublishing never clears an existing publication timestamp.
pub fn toggle(currently_published: bool, stamp: PublishStamp, now: Timestamp) -> PublishChange {
    let is_published = !currently_published;
    let published_at = match stamp {
        PublishStamp::StampOnPublish if is_published => Some(now),
        _ => None,
    };
    PublishChange {
        is_published,
        published_at,
    }
}

/// Apply a [`PublishChange`] to in-memory fields.
///
/// Used by repository implementations that do not go through SQL.
pub fn apply(change: PublishChange, is_published: &mut bool, published_at: &mut Option<Timestamp>) {
    *is_published = change.is_published;
    if let Some(at) = change.published_at {
        *published_at = Some(at);
    }
}
