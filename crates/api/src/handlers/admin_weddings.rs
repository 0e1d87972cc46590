//! Back-office handlers for weddings and their photo galleries.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use vows_core::error::CoreError;
use vows_core::publication::{toggle, PublishStamp};
use vows_core::types::DbId;
use vows_core::upload::BatchReport;
use vows_db::models::photo::{UpdatePhoto, WeddingPhoto};
use vows_db::models::wedding::{CreateWedding, UpdateWedding, Wedding, WeddingWithPhotos};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::uploads::{upload_photo_batch, CandidateFile};

/// Request body for `PUT /admin/weddings/{id}/cover`.
#[derive(Debug, Deserialize)]
pub struct SetCoverRequest {
    pub photo_id: DbId,
}

fn wedding_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Wedding",
        id,
    })
}

fn photo_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "WeddingPhoto",
        id,
    })
}

async fn find_wedding(state: &AppState, id: DbId) -> AppResult<Wedding> {
    state
        .repos
        .weddings
        .find_by_id(id)
        .await?
        .ok_or_else(|| wedding_not_found(id))
}

/// Load a photo and check it belongs to `wedding_id`.
async fn find_photo(state: &AppState, wedding_id: DbId, photo_id: DbId) -> AppResult<WeddingPhoto> {
    state
        .repos
        .photos
        .find_by_id(photo_id)
        .await?
        .filter(|p| p.wedding_id == wedding_id)
        .ok_or_else(|| photo_not_found(photo_id))
}

/// Best-effort removal of a stored photo file.
async fn remove_object(state: &AppState, key: &str) {
    if let Err(e) = state.storage.remove(key).await {
        tracing::warn!(key, error = %e, "Failed to remove stored photo");
    }
}

// ---------------------------------------------------------------------------
// Weddings
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/weddings
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Wedding>>>> {
    let data = state.repos.weddings.list().await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/admin/weddings
///
/// New weddings start unpublished and without a cover.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateWedding>,
) -> AppResult<(StatusCode, Json<DataResponse<Wedding>>)> {
    let input = input.normalized();
    if input.couple_names.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Couple names are required".into(),
        )));
    }

    let wedding = state.repos.weddings.create(&input).await?;
    tracing::info!(wedding_id = wedding.id, user_id = admin.user_id, "Wedding created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: wedding })))
}

/// GET /api/v1/admin/weddings/{id}
pub async fn get(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<WeddingWithPhotos>>> {
    let wedding = find_wedding(&state, id).await?;
    let photos = state.repos.photos.list_by_wedding(id).await?;
    Ok(Json(DataResponse {
        data: WeddingWithPhotos { wedding, photos },
    }))
}

/// PUT /api/v1/admin/weddings/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWedding>,
) -> AppResult<Json<DataResponse<Wedding>>> {
    if input
        .couple_names
        .as_deref()
        .is_some_and(|n| n.trim().is_empty())
    {
        return Err(AppError::Core(CoreError::Validation(
            "Couple names cannot be blank".into(),
        )));
    }

    let wedding = state
        .repos
        .weddings
        .update(id, &input)
        .await?
        .ok_or_else(|| wedding_not_found(id))?;
    Ok(Json(DataResponse { data: wedding }))
}

/// DELETE /api/v1/admin/weddings/{id}
///
/// Photo rows go with the wedding; their stored files are removed afterwards.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let photos = state.repos.photos.list_by_wedding(id).await?;
    if !state.repos.weddings.delete(id).await? {
        return Err(wedding_not_found(id));
    }

    for photo in &photos {
        remove_object(&state, &photo.storage_path).await;
    }

    tracing::info!(
        wedding_id = id,
        user_id = admin.user_id,
        photos = photos.len(),
        "Wedding deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/weddings/{id}/publish
///
/// Flip the published flag.
pub async fn toggle_publish(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Wedding>>> {
    let wedding = find_wedding(&state, id).await?;
    let change = toggle(wedding.is_published, PublishStamp::FlagOnly, chrono::Utc::now());
    let wedding = state
        .repos
        .weddings
        .set_published(id, change.is_published)
        .await?
        .ok_or_else(|| wedding_not_found(id))?;
    Ok(Json(DataResponse { data: wedding }))
}

/// PUT /api/v1/admin/weddings/{id}/cover
///
/// Copy the URL of one of the wedding's photos into its cover.
pub async fn set_cover(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetCoverRequest>,
) -> AppResult<Json<DataResponse<Wedding>>> {
    find_wedding(&state, id).await?;
    let photo = find_photo(&state, id, input.photo_id).await?;

    let wedding = state
        .repos
        .weddings
        .set_cover(id, &photo.url)
        .await?
        .ok_or_else(|| wedding_not_found(id))?;
    Ok(Json(DataResponse { data: wedding }))
}

// ---------------------------------------------------------------------------
// Photos
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/weddings/{id}/photos
pub async fn list_photos(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<WeddingPhoto>>>> {
    find_wedding(&state, id).await?;
    let data = state.repos.photos.list_by_wedding(id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/admin/weddings/{id}/photos
///
/// Multipart batch upload. Every part carrying a file name is treated as a
/// candidate photo. Responds 200 with a per-file report even when some files
/// were skipped or failed.
pub async fn upload_photos(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<BatchReport>>> {
    let wedding = find_wedding(&state, id).await?;

    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        files.push(CandidateFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    if files.is_empty() {
        return Err(AppError::BadRequest("No files provided".into()));
    }

    let report = upload_photo_batch(&state.repos, state.storage.as_ref(), &wedding, files).await?;
    Ok(Json(DataResponse { data: report }))
}

/// PUT /api/v1/admin/weddings/{id}/photos/{photo_id}
pub async fn update_photo(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((id, photo_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdatePhoto>,
) -> AppResult<Json<DataResponse<WeddingPhoto>>> {
    find_photo(&state, id, photo_id).await?;
    let photo = state
        .repos
        .photos
        .update(photo_id, &input)
        .await?
        .ok_or_else(|| photo_not_found(photo_id))?;
    Ok(Json(DataResponse { data: photo }))
}

/// DELETE /api/v1/admin/weddings/{id}/photos/{photo_id}
///
/// Removes the row and the stored file. A cover pointing at this photo is left as is.
pub async fn delete_photo(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((id, photo_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    find_photo(&state, id, photo_id).await?;
    let photo = state
        .repos
        .photos
        .delete(photo_id)
        .await?
        .ok_or_else(|| photo_not_found(photo_id))?;
    remove_object(&state, &photo.storage_path).await;
    Ok(StatusCode::NO_CONTENT)
}
