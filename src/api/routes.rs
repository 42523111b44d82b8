//! API route configuration.

use crate::api::handlers::{
    collect_handler, list_keys_handler, regenerate_handler, register_handler, revoke_handler,
    shorten_handler, summary_handler, user_stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// API routes that require no credential.
///
/// # Endpoints
///
/// - `POST /auth/register`            - Register an application, issue a key
/// - `GET  /auth/api-key?app_id=`     - List keys of an application (masked)
/// - `POST /auth/revoke`              - Revoke one key by id
/// - `POST /auth/regenerate`          - Replace active keys with a fresh one
/// - `GET  /analytics/event-summary`  - Aggregated event summary
/// - `GET  /analytics/user-stats`     - Per-user statistics
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/api-key", get(list_keys_handler))
        .route("/auth/revoke", post(revoke_handler))
        .route("/auth/regenerate", post(regenerate_handler))
        .route("/analytics/event-summary", get(summary_handler))
        .route("/analytics/user-stats", get(user_stats_handler))
}

/// API routes requiring the `x-api-key` header.
///
/// # Endpoints
///
/// - `POST /analytics/collect` - Ingest one event
/// - `POST /shorten`           - Create a short link
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/collect", post(collect_handler))
        .route("/shorten", post(shorten_handler))
}
