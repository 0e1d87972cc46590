//! Back-office handlers for user accounts and roles.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use vows_core::error::CoreError;
use vows_core::roles::VALID_ROLES;
use vows_core::types::DbId;
use vows_db::models::user::UserResponse;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /admin/users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: String,
}

/// GET /api/v1/admin/users
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = state.repos.users.list().await?;
    Ok(Json(DataResponse {
        data: users.iter().map(UserResponse::from).collect(),
    }))
}

/// PUT /api/v1/admin/users/{id}/role
pub async fn set_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetRoleRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let role = input.role.trim();
    if !VALID_ROLES.contains(&role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))));
    }

    let user = state
        .repos
        .users
        .set_role(id, role)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, role, changed_by = admin.user_id, "User role changed");
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}
