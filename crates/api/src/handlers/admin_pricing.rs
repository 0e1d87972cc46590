//! Back-office handlers for pricing plans.
//!
//! The plan catalogue is seeded at startup; administrators edit price,
//! features and visibility but do not add or remove plans.

use axum::extract::{Path, State};
use axum::Json;
use vows_core::error::CoreError;
use vows_core::types::DbId;
use vows_db::models::pricing::{PlanChanges, PricingPlan, UpdatePricingPlan};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/pricing
///
/// Every plan, active or not, by category then sort order.
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PricingPlan>>>> {
    let data = state.repos.pricing.list().await?;
    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/admin/pricing/{id}
///
/// `features` may be an array or newline-separated text.
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePricingPlan>,
) -> AppResult<Json<DataResponse<PricingPlan>>> {
    let changes = PlanChanges::from(input);
    let plan = state
        .repos
        .pricing
        .update(id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PricingPlan",
            id,
        }))?;
    tracing::info!(plan_id = id, is_active = plan.is_active, "Pricing plan updated");
    Ok(Json(DataResponse { data: plan }))
}
