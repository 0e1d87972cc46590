//! Back-office handlers for wedding stories.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use vows_core::error::CoreError;
use vows_core::publication::{toggle, PublishStamp};
use vows_core::types::DbId;
use vows_db::models::non_blank;
use vows_db::models::story::{CreateStory, Story};

use super::content_slug;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Story",
        id,
    })
}

/// GET /api/v1/admin/stories
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Story>>>> {
    let data = state.repos.stories.list().await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/admin/stories
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateStory>,
) -> AppResult<(StatusCode, Json<DataResponse<Story>>)> {
    let slug = content_slug(&input.title, input.slug.as_deref())?;
    let input = CreateStory {
        title: input.title.trim().to_string(),
        slug: Some(slug.clone()),
        city: non_blank(input.city),
        venue: non_blank(input.venue),
        wedding_date: non_blank(input.wedding_date),
        content: non_blank(input.content),
        seo_title: non_blank(input.seo_title),
        seo_description: non_blank(input.seo_description),
    };

    let story = state.repos.stories.create(&slug, &input).await?;
    tracing::info!(story_id = story.id, slug = %story.slug, "Story created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: story })))
}

/// GET /api/v1/admin/stories/{id}
pub async fn get(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Story>>> {
    let story = state
        .repos
        .stories
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: story }))
}

/// POST /api/v1/admin/stories/{id}/publish
pub async fn toggle_publish(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Story>>> {
    let story = state
        .repos
        .stories
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let change = toggle(story.is_published, PublishStamp::FlagOnly, Utc::now());
    let story = state
        .repos
        .stories
        .set_published(id, change.is_published)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: story }))
}

/// DELETE /api/v1/admin/stories/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if state.repos.stories.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
