//! Route definitions for the `/admin` back-office.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use vows_core::upload::MAX_BATCH_BODY_BYTES;

use crate::handlers::{
    admin_blog, admin_calendar, admin_pricing, admin_quotes, admin_stories, admin_users,
    admin_videos, admin_weddings, dashboard,
};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET    /dashboard                            -> dashboard::summary
///
/// GET    /weddings                             -> list
/// POST   /weddings                             -> create
/// GET    /weddings/{id}                        -> get (with photos)
/// PUT    /weddings/{id}                        -> update
/// DELETE /weddings/{id}                        -> delete
/// POST   /weddings/{id}/publish                -> toggle_publish
/// PUT    /weddings/{id}/cover                  -> set_cover
/// GET    /weddings/{id}/photos                 -> list_photos
/// POST   /weddings/{id}/photos                 -> upload_photos (multipart)
/// PUT    /weddings/{id}/photos/{photo_id}      -> update_photo
/// DELETE /weddings/{id}/photos/{photo_id}      -> delete_photo
///
/// GET    /videos                               -> list
/// POST   /videos                               -> create
/// DELETE /videos/{id}                          -> delete
///
/// GET    /pricing                              -> list
/// PUT    /pricing/{id}                         -> update
///
/// GET    /quotes                               -> list (?search=&status=)
/// PUT    /quotes/{id}/status                   -> update_status
///
/// GET    /calendar                             -> list
/// POST   /calendar                             -> create
/// DELETE /calendar/{id}                        -> delete
///
/// GET    /blog, /stories                       -> list
/// POST   /blog, /stories                       -> create
/// GET    /blog/{id}, /stories/{id}             -> get
/// DELETE /blog/{id}, /stories/{id}             -> delete
/// POST   /blog/{id}/publish, /stories/{id}/publish -> toggle_publish
///
/// GET    /users                                -> list
/// PUT    /users/{id}/role                      -> set_role
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::summary))
        // Weddings and galleries.
        .route(
            "/weddings",
            get(admin_weddings::list).post(admin_weddings::create),
        )
        .route(
            "/weddings/{id}",
            get(admin_weddings::get)
                .put(admin_weddings::update)
                .delete(admin_weddings::delete),
        )
        .route("/weddings/{id}/publish", post(admin_weddings::toggle_publish))
        .route("/weddings/{id}/cover", put(admin_weddings::set_cover))
        .route(
            "/weddings/{id}/photos",
            get(admin_weddings::list_photos)
                .post(admin_weddings::upload_photos)
                .layer(DefaultBodyLimit::max(MAX_BATCH_BODY_BYTES)),
        )
        .route(
            "/weddings/{id}/photos/{photo_id}",
            put(admin_weddings::update_photo).delete(admin_weddings::delete_photo),
        )
        // Videos.
        .route("/videos", get(admin_videos::list).post(admin_videos::create))
        .route("/videos/{id}", axum::routing::delete(admin_videos::delete))
        // Pricing.
        .route("/pricing", get(admin_pricing::list))
        .route("/pricing/{id}", put(admin_pricing::update))
        // Quotes.
        .route("/quotes", get(admin_quotes::list))
        .route("/quotes/{id}/status", put(admin_quotes::update_status))
        // Reserved dates.
        .route(
            "/calendar",
            get(admin_calendar::list).post(admin_calendar::create),
        )
        .route("/calendar/{id}", axum::routing::delete(admin_calendar::delete))
        // Blog posts.
        .route("/blog", get(admin_blog::list).post(admin_blog::create))
        .route(
            "/blog/{id}",
            get(admin_blog::get).delete(admin_blog::delete),
        )
        .route("/blog/{id}/publish", post(admin_blog::toggle_publish))
        // Stories.
        .route(
            "/stories",
            get(admin_stories::list).post(admin_stories::create),
        )
        .route(
            "/stories/{id}",
            get(admin_stories::get).delete(admin_stories::delete),
        )
        .route("/stories/{id}/publish", post(admin_stories::toggle_publish))
        // Users.
        .route("/users", get(admin_users::list))
        .route("/users/{id}/role", put(admin_users::set_role))
}
