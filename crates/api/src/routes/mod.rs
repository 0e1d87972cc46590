pub mod admin;
pub mod auth;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /public/weddings, /public/weddings/{id}          published weddings with galleries
/// /public/videos                                   portfolio videos
/// /public/pricing                                  active plans grouped by category
/// /public/contact-links                            WhatsApp links (?plan=)
/// /public/reserved-dates                           booked dates
/// /public/quotes                                   inquiry intake (POST)
/// /public/blog, /public/blog/{slug}                published posts
/// /public/stories, /public/stories/{slug}          published stories
///
/// /auth/signup, /auth/login, /auth/refresh         public
/// /auth/logout, /auth/session                      requires auth
///
/// /admin/...                                       back-office (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/public", public::router())
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
}
