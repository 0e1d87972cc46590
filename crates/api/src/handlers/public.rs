//! Handlers for the public site (`/public`).
//!
//! Everything here is read-only except the quote intake form. Unpublished
//! content and inactive pricing plans are never returned.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;
use vows_core::error::CoreError;
use vows_core::inquiry::QuoteForm;
use vows_core::pricing::{group_by_category, CategoryGroup};
use vows_core::types::DbId;
use vows_core::whatsapp::ContactDetails;
use vows_db::models::blog_post::BlogPost;
use vows_db::models::pricing::PricingPlan;
use vows_db::models::quote::Quote;
use vows_db::models::story::Story;
use vows_db::models::video::VideoView;
use vows_db::models::wedding::{Wedding, WeddingWithPhotos};

use crate::error::{AppError, AppResult};
use crate::query::ContactLinkParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// An active plan with its pre-filled WhatsApp link.
#[derive(Debug, Serialize)]
pub struct PlanView {
    #[serde(flatten)]
    pub plan: PricingPlan,
    pub whatsapp_url: String,
}

/// Response for `POST /public/quotes`.
#[derive(Debug, Serialize)]
pub struct QuoteSubmitted {
    pub quote: Quote,
    /// Deep link the visitor is sent to after submitting.
    pub whatsapp_url: String,
}

#[derive(Debug, Serialize)]
pub struct ContactLink {
    pub whatsapp_url: String,
}

// ---------------------------------------------------------------------------
// Weddings and videos
// ---------------------------------------------------------------------------

async fn with_photos(state: &AppState, wedding: Wedding) -> AppResult<WeddingWithPhotos> {
    let photos = state.repos.photos.list_by_wedding(wedding.id).await?;
    Ok(WeddingWithPhotos { wedding, photos })
}

/// GET /api/v1/public/weddings
///
/// Published weddings, newest first, each with its ordered gallery.
pub async fn list_weddings(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<WeddingWithPhotos>>>> {
    let weddings = state.repos.weddings.list_published().await?;
    let mut data = Vec::with_capacity(weddings.len());
    for wedding in weddings {
        data.push(with_photos(&state, wedding).await?);
    }
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/public/weddings/{id}
pub async fn get_wedding(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<WeddingWithPhotos>>> {
    let wedding = state
        .repos
        .weddings
        .find_by_id(id)
        .await?
        .filter(|w| w.is_published)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Wedding",
            id,
        }))?;
    let data = with_photos(&state, wedding).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/public/videos
pub async fn list_videos(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<VideoView>>>> {
    let videos = state.repos.videos.list().await?;
    Ok(Json(DataResponse {
        data: videos.into_iter().map(VideoView::from).collect(),
    }))
}

// ---------------------------------------------------------------------------
// Pricing and contact
// ---------------------------------------------------------------------------

/// GET /api/v1/public/pricing
///
/// Active plans grouped by category in display order. Empty categories are omitted.
pub async fn list_pricing(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CategoryGroup<PlanView>>>>> {
    let plans = state.repos.pricing.list_active().await?;
    let views = plans
        .into_iter()
        .map(|plan| PlanView {
            whatsapp_url: state.whatsapp.plan(&plan.name),
            plan,
        })
        .collect();
    Ok(Json(DataResponse {
        data: group_by_category(views, |v| v.plan.category),
    }))
}

/// GET /api/v1/public/contact-links?plan=
pub async fn contact_link(
    State(state): State<AppState>,
    Query(params): Query<ContactLinkParams>,
) -> Json<DataResponse<ContactLink>> {
    let whatsapp_url = match params.plan.as_deref().map(str::trim) {
        Some(plan) if !plan.is_empty() => state.whatsapp.plan(plan),
        _ => state.whatsapp.general(),
    };
    Json(DataResponse {
        data: ContactLink { whatsapp_url },
    })
}

/// GET /api/v1/public/reserved-dates
///
/// Only the dates are exposed; couple names and notes stay in the back-office.
pub async fn list_reserved_dates(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<NaiveDate>>>> {
    let dates = state.repos.reserved_dates.list().await?;
    Ok(Json(DataResponse {
        data: dates.into_iter().map(|d| d.date).collect(),
    }))
}

/// POST /api/v1/public/quotes
///
/// Record a visitor inquiry with status `new` and return the WhatsApp link
/// carrying the same details.
pub async fn submit_quote(
    State(state): State<AppState>,
    Json(form): Json<QuoteForm>,
) -> AppResult<(StatusCode, Json<DataResponse<QuoteSubmitted>>)> {
    let valid = form.validate_submission()?;
    let quote = state.repos.quotes.create(&valid).await?;

    let whatsapp_url = state.whatsapp.form_submission(&ContactDetails {
        name: &valid.name,
        phone: &valid.phone,
        date: &valid.wedding_date,
        city: &valid.city,
        message: valid.message.as_deref().unwrap_or_default(),
    });

    tracing::info!(quote_id = quote.id, "Quote received");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: QuoteSubmitted {
                quote,
                whatsapp_url,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// Blog and stories
// ---------------------------------------------------------------------------

fn slug_not_found(kind: &str, slug: &str) -> AppError {
    AppError::NotFound(format!("{kind} '{slug}' not found"))
}

/// GET /api/v1/public/blog
pub async fn list_blog_posts(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<BlogPost>>>> {
    let data = state.repos.blog_posts.list_published().await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/public/blog/{slug}
pub async fn get_blog_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<BlogPost>>> {
    let data = state
        .repos
        .blog_posts
        .find_published_by_slug(&slug)
        .await?
        .ok_or_else(|| slug_not_found("Blog post", &slug))?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/public/stories
pub async fn list_stories(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Story>>>> {
    let data = state.repos.stories.list_published().await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/public/stories/{slug}
pub async fn get_story(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Story>>> {
    let data = state
        .repos
        .stories
        .find_published_by_slug(&slug)
        .await?
        .ok_or_else(|| slug_not_found("Story", &slug))?;
    Ok(Json(DataResponse { data }))
}
