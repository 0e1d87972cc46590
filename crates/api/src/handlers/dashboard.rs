//! Back-office dashboard summary.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use vows_core::dashboard::{recent, DashboardCounts};
use vows_core::inquiry::QuoteFilter;

use super::admin_quotes::QuoteView;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub counts: DashboardCounts,
    /// Most recent quotes, newest first.
    pub recent_quotes: Vec<QuoteView>,
}

/// GET /api/v1/admin/dashboard
pub async fn summary(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let weddings = state.repos.weddings.count().await?;
    let reserved_dates = state.repos.reserved_dates.count().await?;
    let quotes = state.repos.quotes.list(&QuoteFilter::default()).await?;

    let counts = DashboardCounts::from_statuses(weddings, reserved_dates, quotes.iter().map(|q| q.status));
    let recent_quotes = recent(&quotes).into_iter().map(QuoteView::from).collect();

    Ok(Json(DataResponse {
        data: DashboardSummary {
            counts,
            recent_quotes,
        },
    }))
}
