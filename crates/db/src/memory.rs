//! In-process implementation of every repository trait.
//!
//! Mirrors the PostgreSQL schema closely enough for handler tests: ids are
//! assigned sequentially, orderings match the SQL, photo rows cascade with
//! their wedding, and the `uq_*` unique constraints are enforced with the
//! same constraint names and SQLSTATE so error mapping behaves identically.

use std::borrow::Cow;
use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::error::{DatabaseError, ErrorKind};
use vows_core::inquiry::{QuoteFilter, QuoteStatus, ValidQuote};
use vows_core::publication::{self, PublishChange};
use vows_core::types::DbId;

use crate::models::blog_post::{BlogPost, CreateBlogPost};
use crate::models::photo::{CreatePhoto, UpdatePhoto, WeddingPhoto};
use crate::models::pricing::{CreatePricingPlan, PlanChanges, PricingPlan};
use crate::models::quote::Quote;
use crate::models::reserved_date::{CreateReservedDate, ReservedDate};
use crate::models::session::{CreateSession, UserSession};
use crate::models::story::{CreateStory, Story};
use crate::models::user::{CreateUser, User};
use crate::models::video::{CreateVideo, PortfolioVideo};
use crate::models::wedding::{CreateWedding, UpdateWedding, Wedding};
use crate::repositories::{
    BlogPostRepo, PhotoRepo, PricingRepo, QuoteRepo, ReservedDateRepo, SessionRepo, StoryRepo,
    UserRepo, VideoRepo, WeddingRepo,
};

// ---------------------------------------------------------------------------
// Constraint errors
// ---------------------------------------------------------------------------

/// A constraint violation raised by [`MemoryStore`], shaped like a Postgres error.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ConstraintViolation {
    message: String,
    constraint: &'static str,
    kind: ErrorKind,
}

impl ConstraintViolation {
    /// A `23505` unique violation on `constraint`.
    pub fn unique(constraint: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(Self {
            message: format!("duplicate key value violates unique constraint \"{constraint}\""),
            constraint,
            kind: ErrorKind::UniqueViolation,
        }))
    }

    /// A `23503` foreign key violation on `constraint`.
    pub fn foreign_key(constraint: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(Self {
            message: format!("insert violates foreign key constraint \"{constraint}\""),
            constraint,
            kind: ErrorKind::ForeignKeyViolation,
        }))
    }
}

impl DatabaseError for ConstraintViolation {
    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        match self.kind {
            ErrorKind::UniqueViolation => Some(Cow::Borrowed("23505")),
            ErrorKind::ForeignKeyViolation => Some(Cow::Borrowed("23503")),
            _ => None,
        }
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn constraint(&self) -> Option<&str> {
        Some(self.constraint)
    }

    fn kind(&self) -> ErrorKind {
        match self.kind {
            ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
            ErrorKind::ForeignKeyViolation => ErrorKind::ForeignKeyViolation,
            _ => ErrorKind::Other,
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Tables {
    next_id: DbId,
    weddings: Vec<Wedding>,
    photos: Vec<WeddingPhoto>,
    videos: Vec<PortfolioVideo>,
    plans: Vec<PricingPlan>,
    quotes: Vec<Quote>,
    reserved_dates: Vec<ReservedDate>,
    blog_posts: Vec<BlogPost>,
    stories: Vec<Story>,
    users: Vec<User>,
    sessions: Vec<UserSession>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// Vector-backed tables guarded by a single mutex.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_photo_inserts: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent photo insert fail with a database error.
    pub fn fail_photo_inserts(&self, fail: bool) {
        self.fail_photo_inserts.store(fail, Ordering::SeqCst);
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Newest first, ties broken by id.
fn newest_first<T>(rows: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<Utc>, DbId)) {
    rows.sort_by_key(|row| Reverse(key(row)));
}

// ---------------------------------------------------------------------------
// Weddings and photos
// ---------------------------------------------------------------------------

#[async_trait]
impl WeddingRepo for MemoryStore {
    async fn create(&self, input: &CreateWedding) -> Result<Wedding, sqlx::Error> {
        let mut t = self.tables();
        let now = Utc::now();
        let wedding = Wedding {
            id: t.next_id(),
            couple_names: input.couple_names.clone(),
            city: input.city.clone(),
            venue: input.venue.clone(),
            date: input.date.clone(),
            description: input.description.clone(),
            cover_photo_url: None,
            is_published: false,
            created_at: now,
            updated_at: now,
        };
        t.weddings.push(wedding.clone());
        Ok(wedding)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Wedding>, sqlx::Error> {
        Ok(self.tables().weddings.iter().find(|w| w.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Wedding>, sqlx::Error> {
        let mut rows = self.tables().weddings.clone();
        newest_first(&mut rows, |w| (w.created_at, w.id));
        Ok(rows)
    }

    async fn list_published(&self) -> Result<Vec<Wedding>, sqlx::Error> {
        let mut rows: Vec<Wedding> = self
            .tables()
            .weddings
            .iter()
            .filter(|w| w.is_published)
            .cloned()
            .collect();
        newest_first(&mut rows, |w| (w.created_at, w.id));
        Ok(rows)
    }

    async fn update(&self, id: DbId, input: &UpdateWedding) -> Result<Option<Wedding>, sqlx::Error> {
        let mut t = self.tables();
        let Some(w) = t.weddings.iter_mut().find(|w| w.id == id) else {
            return Ok(None);
        };
        if let Some(v) = &input.couple_names {
            w.couple_names = v.clone();
        }
        if let Some(v) = &input.city {
            w.city = Some(v.clone());
        }
        if let Some(v) = &input.venue {
            w.venue = Some(v.clone());
        }
        if let Some(v) = &input.date {
            w.date = Some(v.clone());
        }
        if let Some(v) = &input.description {
            w.description = Some(v.clone());
        }
        w.updated_at = Utc::now();
        Ok(Some(w.clone()))
    }

    async fn set_published(&self, id: DbId, is_published: bool) -> Result<Option<Wedding>, sqlx::Error> {
        let mut t = self.tables();
        Ok(t.weddings.iter_mut().find(|w| w.id == id).map(|w| {
            w.is_published = is_published;
            w.updated_at = Utc::now();
            w.clone()
        }))
    }

    async fn set_cover(&self, id: DbId, url: &str) -> Result<Option<Wedding>, sqlx::Error> {
        let mut t = self.tables();
        Ok(t.weddings.iter_mut().find(|w| w.id == id).map(|w| {
            w.cover_photo_url = Some(url.to_string());
            w.updated_at = Utc::now();
            w.clone()
        }))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut t = self.tables();
        let before = t.weddings.len();
        t.weddings.retain(|w| w.id != id);
        let removed = t.weddings.len() < before;
        if removed {
            t.photos.retain(|p| p.wedding_id != id);
        }
        Ok(removed)
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        Ok(self.tables().weddings.len() as i64)
    }
}

#[async_trait]
impl PhotoRepo for MemoryStore {
    async fn create(&self, input: &CreatePhoto) -> Result<WeddingPhoto, sqlx::Error> {
        if self.fail_photo_inserts.load(Ordering::SeqCst) {
            return Err(sqlx::Error::Protocol("simulated photo insert failure".into()));
        }
        let mut t = self.tables();
        if !t.weddings.iter().any(|w| w.id == input.wedding_id) {
            return Err(ConstraintViolation::foreign_key("fk_wedding_photos_wedding_id"));
        }
        let photo = WeddingPhoto {
            id: t.next_id(),
            wedding_id: input.wedding_id,
            storage_path: input.storage_path.clone(),
            url: input.url.clone(),
            caption: input.caption.clone(),
            sort_order: input.sort_order,
            created_at: Utc::now(),
        };
        t.photos.push(photo.clone());
        Ok(photo)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<WeddingPhoto>, sqlx::Error> {
        Ok(self.tables().photos.iter().find(|p| p.id == id).cloned())
    }

    async fn list_by_wedding(&self, wedding_id: DbId) -> Result<Vec<WeddingPhoto>, sqlx::Error> {
        let mut rows: Vec<WeddingPhoto> = self
            .tables()
            .photos
            .iter()
            .filter(|p| p.wedding_id == wedding_id)
            .cloned()
            .collect();
        rows.sort_by_key(|p| (p.sort_order, p.id));
        Ok(rows)
    }

    async fn count_by_wedding(&self, wedding_id: DbId) -> Result<i64, sqlx::Error> {
        Ok(self
            .tables()
            .photos
            .iter()
            .filter(|p| p.wedding_id == wedding_id)
            .count() as i64)
    }

    async fn update(&self, id: DbId, input: &UpdatePhoto) -> Result<Option<WeddingPhoto>, sqlx::Error> {
        let mut t = self.tables();
        Ok(t.photos.iter_mut().find(|p| p.id == id).map(|p| {
            if let Some(caption) = &input.caption {
                p.caption = Some(caption.clone());
            }
            if let Some(order) = input.sort_order {
                p.sort_order = order;
            }
            p.clone()
        }))
    }

    async fn delete(&self, id: DbId) -> Result<Option<WeddingPhoto>, sqlx::Error> {
        let mut t = self.tables();
        let position = t.photos.iter().position(|p| p.id == id);
        Ok(position.map(|i| t.photos.remove(i)))
    }
}

// ---------------------------------------------------------------------------
// Videos and pricing
// ---------------------------------------------------------------------------

#[async_trait]
impl VideoRepo for MemoryStore {
    async fn create(&self, input: &CreateVideo) -> Result<PortfolioVideo, sqlx::Error> {
        let mut t = self.tables();
        let sort_order = input.sort_order.unwrap_or(t.videos.len() as i32);
        let video = PortfolioVideo {
            id: t.next_id(),
            youtube_url: input.youtube_url.clone(),
            title: input.title.clone(),
            sort_order,
            created_at: Utc::now(),
        };
        t.videos.push(video.clone());
        Ok(video)
    }

    async fn list(&self) -> Result<Vec<PortfolioVideo>, sqlx::Error> {
        let mut rows = self.tables().videos.clone();
        rows.sort_by_key(|v| (v.sort_order, v.id));
        Ok(rows)
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut t = self.tables();
        let before = t.videos.len();
        t.videos.retain(|v| v.id != id);
        Ok(t.videos.len() < before)
    }
}

fn sort_plans(rows: &mut [PricingPlan]) {
    rows.sort_by(|a, b| {
        (a.category.as_str(), a.sort_order, a.id).cmp(&(b.category.as_str(), b.sort_order, b.id))
    });
}

#[async_trait]
impl PricingRepo for MemoryStore {
    async fn create(&self, input: &CreatePricingPlan) -> Result<PricingPlan, sqlx::Error> {
        let mut t = self.tables();
        let now = Utc::now();
        let plan = PricingPlan {
            id: t.next_id(),
            category: input.category,
            name: input.name.clone(),
            price: input.price.clone(),
            features: input.features.clone(),
            badge: input.badge.clone(),
            highlight: input.highlight,
            is_active: true,
            sort_order: input.sort_order,
            created_at: now,
            updated_at: now,
        };
        t.plans.push(plan.clone());
        Ok(plan)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<PricingPlan>, sqlx::Error> {
        Ok(self.tables().plans.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<PricingPlan>, sqlx::Error> {
        let mut rows = self.tables().plans.clone();
        sort_plans(&mut rows);
        Ok(rows)
    }

    async fn list_active(&self) -> Result<Vec<PricingPlan>, sqlx::Error> {
        let mut rows: Vec<PricingPlan> = self
            .tables()
            .plans
            .iter()
            .filter(|p| p.is_active)
            .cloned()
            .collect();
        sort_plans(&mut rows);
        Ok(rows)
    }

    async fn update(&self, id: DbId, changes: &PlanChanges) -> Result<Option<PricingPlan>, sqlx::Error> {
        let mut t = self.tables();
        Ok(t.plans.iter_mut().find(|p| p.id == id).map(|p| {
            if let Some(price) = &changes.price {
                p.price = price.clone();
            }
            if let Some(features) = &changes.features {
                p.features = features.clone();
            }
            if let Some(active) = changes.is_active {
                p.is_active = active;
            }
            p.updated_at = Utc::now();
            p.clone()
        }))
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        Ok(self.tables().plans.len() as i64)
    }
}

// ---------------------------------------------------------------------------
// Quotes and calendar
// ---------------------------------------------------------------------------

#[async_trait]
impl QuoteRepo for MemoryStore {
    async fn create(&self, input: &ValidQuote) -> Result<Quote, sqlx::Error> {
        let mut t = self.tables();
        let now = Utc::now();
        let quote = Quote {
            id: t.next_id(),
            name: input.name.clone(),
            phone: input.phone.clone(),
            wedding_date: Some(input.wedding_date.clone()),
            city: Some(input.city.clone()),
            message: input.message.clone(),
            status: QuoteStatus::INITIAL,
            created_at: now,
            updated_at: now,
        };
        t.quotes.push(quote.clone());
        Ok(quote)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Quote>, sqlx::Error> {
        Ok(self.tables().quotes.iter().find(|q| q.id == id).cloned())
    }

    async fn list(&self, filter: &QuoteFilter) -> Result<Vec<Quote>, sqlx::Error> {
        let mut rows: Vec<Quote> = self
            .tables()
            .quotes
            .iter()
            .filter(|q| filter.matches(&q.fields()))
            .cloned()
            .collect();
        newest_first(&mut rows, |q| (q.created_at, q.id));
        Ok(rows)
    }

    async fn update_status(&self, id: DbId, status: QuoteStatus) -> Result<Option<Quote>, sqlx::Error> {
        let mut t = self.tables();
        Ok(t.quotes.iter_mut().find(|q| q.id == id).map(|q| {
            q.status = status;
            q.updated_at = Utc::now();
            q.clone()
        }))
    }
}

#[async_trait]
impl ReservedDateRepo for MemoryStore {
    async fn create(&self, input: &CreateReservedDate) -> Result<ReservedDate, sqlx::Error> {
        let mut t = self.tables();
        if t.reserved_dates.iter().any(|d| d.date == input.date) {
            return Err(ConstraintViolation::unique("uq_reserved_dates_date"));
        }
        let reserved = ReservedDate {
            id: t.next_id(),
            date: input.date,
            couple_names: input.couple_names.clone(),
            notes: input.notes.clone(),
            created_at: Utc::now(),
        };
        t.reserved_dates.push(reserved.clone());
        Ok(reserved)
    }

    async fn list(&self) -> Result<Vec<ReservedDate>, sqlx::Error> {
        let mut rows = self.tables().reserved_dates.clone();
        rows.sort_by_key(|d| d.date);
        Ok(rows)
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut t = self.tables();
        let before = t.reserved_dates.len();
        t.reserved_dates.retain(|d| d.id != id);
        Ok(t.reserved_dates.len() < before)
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        Ok(self.tables().reserved_dates.len() as i64)
    }
}

// ---------------------------------------------------------------------------
// Blog posts and stories
// ---------------------------------------------------------------------------

#[async_trait]
impl BlogPostRepo for MemoryStore {
    async fn create(&self, slug: &str, input: &CreateBlogPost) -> Result<BlogPost, sqlx::Error> {
        let mut t = self.tables();
        if t.blog_posts.iter().any(|p| p.slug == slug) {
            return Err(ConstraintViolation::unique("uq_blog_posts_slug"));
        }
        let now = Utc::now();
        let post = BlogPost {
            id: t.next_id(),
            title: input.title.clone(),
            slug: slug.to_string(),
            excerpt: input.excerpt.clone(),
            content: input.content.clone(),
            seo_title: input.seo_title.clone(),
            seo_description: input.seo_description.clone(),
            is_published: false,
            published_at: None,
            created_at: now,
            updated_at: now,
        };
        t.blog_posts.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<BlogPost>, sqlx::Error> {
        Ok(self.tables().blog_posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, sqlx::Error> {
        Ok(self
            .tables()
            .blog_posts
            .iter()
            .find(|p| p.slug == slug && p.is_published)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<BlogPost>, sqlx::Error> {
        let mut rows = self.tables().blog_posts.clone();
        newest_first(&mut rows, |p| (p.created_at, p.id));
        Ok(rows)
    }

    async fn list_published(&self) -> Result<Vec<BlogPost>, sqlx::Error> {
        let mut rows: Vec<BlogPost> = self
            .tables()
            .blog_posts
            .iter()
            .filter(|p| p.is_published)
            .cloned()
            .collect();
        // `None` sorts below `Some`, so reversing puts unstamped posts last.
        rows.sort_by_key(|p| Reverse((p.published_at, p.id)));
        Ok(rows)
    }

    async fn set_published(&self, id: DbId, change: PublishChange) -> Result<Option<BlogPost>, sqlx::Error> {
        let mut t = self.tables();
        Ok(t.blog_posts.iter_mut().find(|p| p.id == id).map(|p| {
            publication::apply(change, &mut p.is_published, &mut p.published_at);
            p.updated_at = Utc::now();
            p.clone()
        }))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut t = self.tables();
        let before = t.blog_posts.len();
        t.blog_posts.retain(|p| p.id != id);
        Ok(t.blog_posts.len() < before)
    }
}

#[async_trait]
impl StoryRepo for MemoryStore {
    async fn create(&self, slug: &str, input: &CreateStory) -> Result<Story, sqlx::Error> {
        let mut t = self.tables();
        if t.stories.iter().any(|s| s.slug == slug) {
            return Err(ConstraintViolation::unique("uq_stories_slug"));
        }
        let now = Utc::now();
        let story = Story {
            id: t.next_id(),
            title: input.title.clone(),
            slug: slug.to_string(),
            city: input.city.clone(),
            venue: input.venue.clone(),
            wedding_date: input.wedding_date.clone(),
            content: input.content.clone(),
            seo_title: input.seo_title.clone(),
            seo_description: input.seo_description.clone(),
            is_published: false,
            created_at: now,
            updated_at: now,
        };
        t.stories.push(story.clone());
        Ok(story)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Story>, sqlx::Error> {
        Ok(self.tables().stories.iter().find(|s| s.id == id).cloned())
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Story>, sqlx::Error> {
        Ok(self
            .tables()
            .stories
            .iter()
            .find(|s| s.slug == slug && s.is_published)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Story>, sqlx::Error> {
        let mut rows = self.tables().stories.clone();
        newest_first(&mut rows, |s| (s.created_at, s.id));
        Ok(rows)
    }

    async fn list_published(&self) -> Result<Vec<Story>, sqlx::Error> {
        let mut rows: Vec<Story> = self
            .tables()
            .stories
            .iter()
            .filter(|s| s.is_published)
            .cloned()
            .collect();
        newest_first(&mut rows, |s| (s.created_at, s.id));
        Ok(rows)
    }

    async fn set_published(&self, id: DbId, is_published: bool) -> Result<Option<Story>, sqlx::Error> {
        let mut t = self.tables();
        Ok(t.stories.iter_mut().find(|s| s.id == id).map(|s| {
            s.is_published = is_published;
            s.updated_at = Utc::now();
            s.clone()
        }))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut t = self.tables();
        let before = t.stories.len();
        t.stories.retain(|s| s.id != id);
        Ok(t.stories.len() < before)
    }
}

// ---------------------------------------------------------------------------
// Users and sessions
// ---------------------------------------------------------------------------

#[async_trait]
impl UserRepo for MemoryStore {
    async fn create(&self, input: &CreateUser) -> Result<User, sqlx::Error> {
        let mut t = self.tables();
        if t.users.iter().any(|u| u.email == input.email) {
            return Err(ConstraintViolation::unique("uq_users_email"));
        }
        let now = Utc::now();
        let user = User {
            id: t.next_id(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role.clone(),
            created_at: now,
            updated_at: now,
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, sqlx::Error> {
        Ok(self.tables().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        Ok(self.tables().users.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, sqlx::Error> {
        let mut rows = self.tables().users.clone();
        rows.sort_by_key(|u| u.id);
        Ok(rows)
    }

    async fn set_role(&self, id: DbId, role: &str) -> Result<Option<User>, sqlx::Error> {
        let mut t = self.tables();
        Ok(t.users.iter_mut().find(|u| u.id == id).map(|u| {
            u.role = role.to_string();
            u.updated_at = Utc::now();
            u.clone()
        }))
    }
}

#[async_trait]
impl SessionRepo for MemoryStore {
    async fn create(&self, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        let mut t = self.tables();
        let now = Utc::now();
        let session = UserSession {
            id: t.next_id(),
            user_id: input.user_id,
            refresh_token_hash: input.refresh_token_hash.clone(),
            expires_at: input.expires_at,
            is_revoked: false,
            created_at: now,
            updated_at: now,
        };
        t.sessions.push(session.clone());
        Ok(session)
    }

    async fn find_active_by_hash(&self, hash: &str) -> Result<Option<UserSession>, sqlx::Error> {
        let now = Utc::now();
        Ok(self
            .tables()
            .sessions
            .iter()
            .find(|s| s.refresh_token_hash == hash && !s.is_revoked && s.expires_at > now)
            .cloned())
    }

    async fn revoke(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut t = self.tables();
        match t.sessions.iter_mut().find(|s| s.id == id && !s.is_revoked) {
            Some(s) => {
                s.is_revoked = true;
                s.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: DbId) -> Result<u64, sqlx::Error> {
        let mut t = self.tables();
        let now = Utc::now();
        let mut revoked = 0;
        for s in t
            .sessions
            .iter_mut()
            .filter(|s| s.user_id == user_id && !s.is_revoked)
        {
            s.is_revoked = true;
            s.updated_at = now;
            revoked += 1;
        }
        Ok(revoked)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use vows_core::publication::{toggle, PublishStamp};

    use super::*;

    fn wedding(names: &str) -> CreateWedding {
        CreateWedding {
            couple_names: names.into(),
            city: None,
            venue: None,
            date: None,
            description: None,
        }
    }

    fn photo(wedding_id: DbId, sort_order: i32) -> CreatePhoto {
        CreatePhoto {
            wedding_id,
            storage_path: format!("{wedding_id}/{sort_order}.jpg"),
            url: format!("memory://media/{wedding_id}/{sort_order}.jpg"),
            caption: None,
            sort_order,
        }
    }

    #[tokio::test]
    async fn deleting_wedding_cascades_to_photos() {
        let store = MemoryStore::new();
        let w = WeddingRepo::create(&store, &wedding("Ana & Pedro")).await.unwrap();
        PhotoRepo::create(&store, &photo(w.id, 0)).await.unwrap();
        PhotoRepo::create(&store, &photo(w.id, 1)).await.unwrap();

        assert!(WeddingRepo::delete(&store, w.id).await.unwrap());
        assert_eq!(store.count_by_wedding(w.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn photo_insert_requires_wedding() {
        let store = MemoryStore::new();
        let err = PhotoRepo::create(&store, &photo(999, 0)).await.unwrap_err();
        assert_matches!(err, sqlx::Error::Database(db) if db.constraint() == Some("fk_wedding_photos_wedding_id"));
    }

    #[tokio::test]
    async fn duplicate_slug_is_a_unique_violation() {
        let store = MemoryStore::new();
        let input = CreateBlogPost {
            title: "Hello".into(),
            slug: None,
            excerpt: None,
            content: None,
            seo_title: None,
            seo_description: None,
        };
        BlogPostRepo::create(&store, "hello", &input).await.unwrap();
        let err = BlogPostRepo::create(&store, "hello", &input).await.unwrap_err();
        match err {
            sqlx::Error::Database(db) => {
                assert_eq!(db.code().as_deref(), Some("23505"));
                assert_eq!(db.constraint(), Some("uq_blog_posts_slug"));
            }
            other => panic!("expected database error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unpublishing_keeps_publication_stamp() {
        let store = MemoryStore::new();
        let input = CreateBlogPost {
            title: "Post".into(),
            slug: None,
            excerpt: None,
            content: None,
            seo_title: None,
            seo_description: None,
        };
        let post = BlogPostRepo::create(&store, "post", &input).await.unwrap();
        let now = Utc::now();

        let published =
            BlogPostRepo::set_published(&store, post.id, toggle(false, PublishStamp::StampOnPublish, now))
                .await
                .unwrap()
                .unwrap();
        assert_eq!(published.published_at, Some(now));

        let unpublished =
            BlogPostRepo::set_published(&store, post.id, toggle(true, PublishStamp::StampOnPublish, now))
                .await
                .unwrap()
                .unwrap();
        assert!(!unpublished.is_published);
        assert_eq!(unpublished.published_at, Some(now));
    }

    #[tokio::test]
    async fn reserved_dates_are_unique_and_ordered() {
        let store = MemoryStore::new();
        let date = |d| CreateReservedDate {
            date: NaiveDate::from_ymd_opt(2025, 10, d).unwrap(),
            couple_names: None,
            notes: None,
        };
        ReservedDateRepo::create(&store, &date(20)).await.unwrap();
        ReservedDateRepo::create(&store, &date(4)).await.unwrap();
        assert!(ReservedDateRepo::create(&store, &date(4)).await.is_err());

        let listed = ReservedDateRepo::list(&store).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].date < listed[1].date);
    }

    #[tokio::test]
    async fn quote_list_applies_filter_newest_first() {
        let store = MemoryStore::new();
        for name in ["Ana", "Bruno", "Ana Clara"] {
            QuoteRepo::create(
                &store,
                &ValidQuote {
                    name: name.into(),
                    phone: "4799".into(),
                    wedding_date: "2025".into(),
                    city: "Joinville".into(),
                    message: None,
                },
            )
            .await
            .unwrap();
        }
        let filter = QuoteFilter::from_params(Some("ana"), None).unwrap();
        let rows = QuoteRepo::list(&store, &filter).await.unwrap();
        let names: Vec<_> = rows.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, vec!["Ana Clara", "Ana"]);
    }

    #[tokio::test]
    async fn revoke_all_only_touches_active_sessions() {
        let store = MemoryStore::new();
        let expires_at = Utc::now() + chrono::Duration::days(1);
        for hash in ["a", "b"] {
            SessionRepo::create(
                &store,
                &CreateSession {
                    user_id: 1,
                    refresh_token_hash: hash.into(),
                    expires_at,
                },
            )
            .await
            .unwrap();
        }
        let first = store.find_active_by_hash("a").await.unwrap().unwrap();
        assert!(SessionRepo::revoke(&store, first.id).await.unwrap());
        assert_eq!(store.revoke_all_for_user(1).await.unwrap(), 1);
        assert!(store.find_active_by_hash("b").await.unwrap().is_none());
    }
}
