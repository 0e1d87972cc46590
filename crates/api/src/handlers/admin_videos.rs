//! Back-office handlers for the portfolio video list.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use vows_core::error::CoreError;
use vows_core::types::DbId;
use vows_db::models::non_blank;
use vows_db::models::video::{CreateVideo, VideoView};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/videos
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<VideoView>>>> {
    let videos = state.repos.videos.list().await?;
    Ok(Json(DataResponse {
        data: videos.into_iter().map(VideoView::from).collect(),
    }))
}

/// POST /api/v1/admin/videos
///
/// Appends at the end of the list unless `sort_order` is given.
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateVideo>,
) -> AppResult<(StatusCode, Json<DataResponse<VideoView>>)> {
    let youtube_url = input.youtube_url.trim().to_string();
    if youtube_url.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "YouTube URL is required".into(),
        )));
    }

    let input = CreateVideo {
        youtube_url,
        title: non_blank(input.title),
        sort_order: input.sort_order,
    };
    let video = state.repos.videos.create(&input).await?;
    if video.youtube_id().is_none() {
        tracing::warn!(video_id = video.id, url = %video.youtube_url, "Video URL has no recognizable YouTube id");
    }
    Ok((StatusCode::CREATED, Json(DataResponse { data: video.into() })))
}

/// DELETE /api/v1/admin/videos/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if state.repos.videos.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "PortfolioVideo",
            id,
        }))
    }
}
