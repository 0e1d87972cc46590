//! Route definitions for the visitor-facing site.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Routes mounted at `/public`. No authentication.
///
/// ```text
/// GET  /weddings          -> list_weddings
/// GET  /weddings/{id}     -> get_wedding
/// GET  /videos            -> list_videos
/// GET  /pricing           -> list_pricing
/// GET  /contact-links     -> contact_link (?plan=)
/// GET  /reserved-dates    -> list_reserved_dates
/// POST /quotes            -> submit_quote
/// GET  /blog              -> list_blog_posts
/// GET  /blog/{slug}       -> get_blog_post
/// GET  /stories           -> list_stories
/// GET  /stories/{slug}    -> get_story
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/weddings", get(public::list_weddings))
        .route("/weddings/{id}", get(public::get_wedding))
        .route("/videos", get(public::list_videos))
        .route("/pricing", get(public::list_pricing))
        .route("/contact-links", get(public::contact_link))
        .route("/reserved-dates", get(public::list_reserved_dates))
        .route("/quotes", post(public::submit_quote))
        .route("/blog", get(public::list_blog_posts))
        .route("/blog/{slug}", get(public::get_blog_post))
        .route("/stories", get(public::list_stories))
        .route("/stories/{slug}", get(public::get_story))
}
