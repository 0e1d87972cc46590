//! Back-office handlers for visitor inquiries.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use vows_core::error::CoreError;
use vows_core::inquiry::{QuoteFilter, QuoteStatus};
use vows_core::types::DbId;
use vows_db::models::quote::Quote;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::QuoteListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A quote with its display label.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteView {
    #[serde(flatten)]
    pub quote: Quote,
    pub status_label: &'static str,
}

impl From<Quote> for QuoteView {
    fn from(quote: Quote) -> Self {
        Self {
            status_label: quote.status.label(),
            quote,
        }
    }
}

/// Request body for `PUT /admin/quotes/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// GET /api/v1/admin/quotes?search=&status=
///
/// Newest first. `status=all` (or no status) lists every status.
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<QuoteListParams>,
) -> AppResult<Json<DataResponse<Vec<QuoteView>>>> {
    let filter = QuoteFilter::from_params(params.search.as_deref(), params.status.as_deref())?;
    let quotes = state.repos.quotes.list(&filter).await?;
    Ok(Json(DataResponse {
        data: quotes.into_iter().map(QuoteView::from).collect(),
    }))
}

/// PUT /api/v1/admin/quotes/{id}/status
pub async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<DataResponse<QuoteView>>> {
    let next: QuoteStatus = input.status.trim().parse()?;

    let not_found = || AppError::Core(CoreError::NotFound { entity: "Quote", id });
    let current = state.repos.quotes.find_by_id(id).await?.ok_or_else(not_found)?;
    if !current.status.can_transition_to(next) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Cannot move quote from '{}' to '{next}'",
            current.status
        ))));
    }

    let quote = state
        .repos
        .quotes
        .update_status(id, next)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(
        quote_id = id,
        from = %current.status,
        to = %next,
        user_id = admin.user_id,
        "Quote status changed"
    );
    Ok(Json(DataResponse { data: quote.into() }))
}
