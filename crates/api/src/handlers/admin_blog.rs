//! Back-office handlers for blog posts.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use vows_core::error::CoreError;
use vows_core::publication::{toggle, PublishStamp};
use vows_core::types::DbId;
use vows_db::models::blog_post::{BlogPost, CreateBlogPost};
use vows_db::models::non_blank;

use super::content_slug;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "BlogPost",
        id,
    })
}

/// GET /api/v1/admin/blog
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BlogPost>>>> {
    let data = state.repos.blog_posts.list().await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/admin/blog
///
/// The slug defaults to one derived from the title. Posts start unpublished.
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateBlogPost>,
) -> AppResult<(StatusCode, Json<DataResponse<BlogPost>>)> {
    let slug = content_slug(&input.title, input.slug.as_deref())?;
    let input = CreateBlogPost {
        title: input.title.trim().to_string(),
        slug: Some(slug.clone()),
        excerpt: non_blank(input.excerpt),
        content: non_blank(input.content),
        seo_title: non_blank(input.seo_title),
        seo_description: non_blank(input.seo_description),
    };

    let post = state.repos.blog_posts.create(&slug, &input).await?;
    tracing::info!(post_id = post.id, slug = %post.slug, "Blog post created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// GET /api/v1/admin/blog/{id}
pub async fn get(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BlogPost>>> {
    let post = state
        .repos
        .blog_posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: post }))
}

/// POST /api/v1/admin/blog/{id}/publish
///
/// The first publication stamps `published_at`; unpublishing keeps it.
pub async fn toggle_publish(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BlogPost>>> {
    let post = state
        .repos
        .blog_posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let change = toggle(post.is_published, PublishStamp::StampOnPublish, Utc::now());
    let post = state
        .repos
        .blog_posts
        .set_published(id, change)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: post }))
}

/// DELETE /api/v1/admin/blog/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if state.repos.blog_posts.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
