//! Repository layer.
//!
//! Each table has an async repository trait. [`PgStore`] implements every
//! trait over a `PgPool`; [`crate::memory::MemoryStore`] implements them over
//! in-process tables. Handlers only see the trait objects in [`Repositories`].

use std::sync::Arc;

use sqlx::PgPool;

use crate::memory::MemoryStore;

pub mod blog_post_repo;
pub mod photo_repo;
pub mod pricing_repo;
pub mod quote_repo;
pub mod reserved_date_repo;
pub mod session_repo;
pub mod story_repo;
pub mod user_repo;
pub mod video_repo;
pub mod wedding_repo;

pub use blog_post_repo::BlogPostRepo;
pub use photo_repo::PhotoRepo;
pub use pricing_repo::PricingRepo;
pub use quote_repo::QuoteRepo;
pub use reserved_date_repo::ReservedDateRepo;
pub use session_repo::SessionRepo;
pub use story_repo::StoryRepo;
pub use user_repo::UserRepo;
pub use video_repo::VideoRepo;
pub use wedding_repo::WeddingRepo;

/// PostgreSQL-backed implementation of every repository trait.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// The full set of repositories shared by request handlers.
///
/// Cheaply cloneable; every field is an `Arc`.
#[derive(Clone)]
pub struct Repositories {
    pub weddings: Arc<dyn WeddingRepo>,
    pub photos: Arc<dyn PhotoRepo>,
    pub videos: Arc<dyn VideoRepo>,
    pub pricing: Arc<dyn PricingRepo>,
    pub quotes: Arc<dyn QuoteRepo>,
    pub reserved_dates: Arc<dyn ReservedDateRepo>,
    pub blog_posts: Arc<dyn BlogPostRepo>,
    pub stories: Arc<dyn StoryRepo>,
    pub users: Arc<dyn UserRepo>,
    pub sessions: Arc<dyn SessionRepo>,
}

impl Repositories {
    /// Repositories backed by PostgreSQL.
    pub fn postgres(pool: PgPool) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self {
            weddings: store.clone(),
            photos: store.clone(),
            videos: store.clone(),
            pricing: store.clone(),
            quotes: store.clone(),
            reserved_dates: store.clone(),
            blog_posts: store.clone(),
            stories: store.clone(),
            users: store.clone(),
            sessions: store,
        }
    }

    /// Repositories backed by a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::from_memory(Arc::new(MemoryStore::new()))
    }

    /// Repositories sharing an existing in-memory store.
    pub fn from_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            weddings: store.clone(),
            photos: store.clone(),
            videos: store.clone(),
            pricing: store.clone(),
            quotes: store.clone(),
            reserved_dates: store.clone(),
            blog_posts: store.clone(),
            stories: store.clone(),
            users: store.clone(),
            sessions: store,
        }
    }
}
