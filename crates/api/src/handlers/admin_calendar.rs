//! Back-office handlers for reserved (booked) dates.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use vows_core::error::CoreError;
use vows_core::types::DbId;
use vows_db::models::non_blank;
use vows_db::models::reserved_date::{CreateReservedDate, ReservedDate};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/calendar
///
/// Ascending by date.
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ReservedDate>>>> {
    let data = state.repos.reserved_dates.list().await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/admin/calendar
///
/// Reserving a date twice is a conflict.
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateReservedDate>,
) -> AppResult<(StatusCode, Json<DataResponse<ReservedDate>>)> {
    let input = CreateReservedDate {
        date: input.date,
        couple_names: non_blank(input.couple_names),
        notes: non_blank(input.notes),
    };
    let reserved = state.repos.reserved_dates.create(&input).await?;
    tracing::info!(date = %reserved.date, "Date reserved");
    Ok((StatusCode::CREATED, Json(DataResponse { data: reserved })))
}

/// DELETE /api/v1/admin/calendar/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if state.repos.reserved_dates.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ReservedDate",
            id,
        }))
    }
}
