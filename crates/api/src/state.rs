use std::sync::Arc;

use vows_core::storage::ObjectStorage;
use vows_core::whatsapp::WhatsAppLinks;
use vows_db::{DbPool, Repositories};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Repository trait objects (PostgreSQL in production, in-memory in tests).
    pub repos: Repositories,
    /// Object storage for wedding photos.
    pub storage: Arc<dyn ObjectStorage>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WhatsApp deep-link builder for the configured studio number.
    pub whatsapp: WhatsAppLinks,
    /// Database pool, when running against PostgreSQL. Used by the health check.
    pub pool: Option<DbPool>,
}

impl AppState {
    pub fn new(
        repos: Repositories,
        storage: Arc<dyn ObjectStorage>,
        config: Arc<ServerConfig>,
        pool: Option<DbPool>,
    ) -> Self {
        let whatsapp = WhatsAppLinks::new(config.whatsapp_number.clone());
        Self {
            repos,
            storage,
            config,
            whatsapp,
            pool,
        }
    }
}
