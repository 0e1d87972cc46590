//! Request handlers.
//!
//! [`public`] serves the visitor-facing site, [`auth`] the session endpoints,
//! and the `admin_*` modules plus [`dashboard`] the back-office. Every admin
//! handler takes a [`crate::middleware::rbac::RequireAdmin`] extractor.

use vows_core::error::CoreError;
use vows_core::slug::{is_valid_slug, slugify};

use crate::error::{AppError, AppResult};

pub mod admin_blog;
pub mod admin_calendar;
pub mod admin_pricing;
pub mod admin_quotes;
pub mod admin_stories;
pub mod admin_users;
pub mod admin_videos;
pub mod admin_weddings;
pub mod auth;
pub mod dashboard;
pub mod public;

/// Slug for new blog posts and stories.
///
/// A non-empty explicit slug is stored exactly as given. Only a slug derived
/// from the title is checked for shape.
pub(crate) fn content_slug(title: &str, explicit: Option<&str>) -> AppResult<String> {
    if title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation("Title is required".into())));
    }
    if let Some(slug) = explicit.filter(|s| !s.is_empty()) {
        return Ok(slug.to_string());
    }
    let slug = slugify(title, None);
    if slug.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must contain at least one letter or digit to derive a slug".into(),
        )));
    }
    if !is_valid_slug(&slug) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid slug '{slug}'. Use lowercase letters, digits and single hyphens"
        ))));
    }
    Ok(slug)
}
