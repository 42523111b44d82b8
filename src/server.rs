//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, service wiring, and the Axum
//! server lifecycle.

use crate::application::services::{
    AnalyticsService, AppService, AuthService, IngestService, LinkService,
};
use crate::config::Config;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{
    PgApiKeyRepository, PgApplicationRepository, PgDatabaseHealth, PgEventRepository,
    PgShortLinkRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Redis cache (or NullCache fallback)
/// - Repositories and services
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, migration run, address
/// parse, or server bind fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let pool = Arc::new(pool);
    let app_repository = Arc::new(PgApplicationRepository::new(pool.clone()));
    let key_repository = Arc::new(PgApiKeyRepository::new(pool.clone()));
    let event_repository = Arc::new(PgEventRepository::new(pool.clone()));
    let link_repository = Arc::new(PgShortLinkRepository::new(pool.clone()));

    let state = AppState {
        auth_service: Arc::new(AuthService::new(key_repository.clone())),
        app_service: Arc::new(AppService::new(app_repository, key_repository.clone())),
        ingest_service: Arc::new(IngestService::new(event_repository.clone())),
        analytics_service: Arc::new(AnalyticsService::new(
            event_repository.clone(),
            cache.clone(),
            config.cache_ttl_seconds,
        )),
        link_service: Arc::new(LinkService::new(
            link_repository,
            key_repository,
            event_repository,
            config.base_url.clone(),
        )),
        cache,
        database: Arc::new(PgDatabaseHealth::new(pool)),
        started_at: Instant::now(),
    };

    let app = app_router(
        state,
        config.behind_proxy,
        config.rate_limit_per_second,
        config.rate_limit_burst,
    );

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .context("Invalid listen address")?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
