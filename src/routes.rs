//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`    - Health check: database and cache (public)
//! - `GET /s/{slug}`  - Short link redirect (public)
//! - `/api/*`         - REST API (credential required for ingest/shorten)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket over the whole router
//! - **Authentication** - `x-api-key` header on the protected routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::error::AppError;
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads the client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket
///   address; enable only behind a trusted reverse proxy
/// - `rate_per_second` / `rate_burst` - token bucket parameters applied to
///   every route
pub fn app_router(
    state: AppState,
    behind_proxy: bool,
    rate_per_second: u64,
    rate_burst: u32,
) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(
        state,
        behind_proxy,
        rate_per_second,
        rate_burst,
    ))
}

/// The router without path normalization, also used by the integration
/// tests.
pub fn router(
    state: AppState,
    behind_proxy: bool,
    rate_per_second: u64,
    rate_burst: u32,
) -> Router {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let api_router = api::routes::public_routes().merge(protected);

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/s/{slug}", get(redirect_handler))
        .nest("/api", api_router)
        .fallback(fallback_handler)
        .with_state(state);

    // Rate limiting covers every inbound request, redirects and health
    // checks included, not just the API subtree.
    let app = if behind_proxy {
        app.layer(rate_limit::proxy_layer(rate_per_second, rate_burst))
    } else {
        app.layer(rate_limit::peer_layer(rate_per_second, rate_burst))
    };

    app.layer(tracing::layer())
}

/// Uniform error body for requests that match no route.
async fn fallback_handler() -> AppError {
    AppError::not_found("Resource not found")
}
