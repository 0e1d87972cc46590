//! Role-based access control extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vows_core::error::CoreError;
use vows_core::roles::is_privileged;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// The role is re-read from the user record so a demotion takes effect
/// before the access token expires.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_privileged(&user.role) {
            return Err(forbidden());
        }

        let current = state
            .repos
            .users
            .find_by_id(user.user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("User no longer exists".into()))
            })?;
        if !is_privileged(&current.role) {
            return Err(forbidden());
        }

        Ok(RequireAdmin(AuthUser {
            user_id: current.id,
            role: current.role,
        }))
    }
}

fn forbidden() -> AppError {
    AppError::Core(CoreError::Forbidden("Admin role required".into()))
}
