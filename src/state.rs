//! Shared application state injected into all handlers.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::application::services::{
    AnalyticsService, AppService, AuthService, IngestService, LinkService,
};
use crate::infrastructure::cache::CacheService;

/// Liveness probe for the backing store, kept behind a trait so the health
/// endpoint works against test doubles.
#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    /// Runs a trivial query against the store.
    ///
    /// # Errors
    ///
    /// Returns a human-readable description of the failure.
    async fn ping(&self) -> Result<(), String>;
}

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub app_service: Arc<AppService>,
    pub ingest_service: Arc<IngestService>,
    pub analytics_service: Arc<AnalyticsService>,
    pub link_service: Arc<LinkService>,
    pub cache: Arc<dyn CacheService>,
    pub database: Arc<dyn DatabaseHealth>,
    pub started_at: Instant,
}
