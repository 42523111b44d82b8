//! Handler for short link redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};

use crate::api::extract::ClientIp;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug to its stored URL.
///
/// # Endpoint
///
/// `GET /s/{slug}`
///
/// Each successful redirect increments the link's click counter and leaves
/// a synthetic `short_url_click` event attributed to the owning
/// application. The response is a `302 Found`, so user agents keep
/// re-requesting the short URL and every visit is counted.
///
/// # Errors
///
/// Returns 404 Not Found for an unknown slug.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let target = state.link_service.resolve(&slug, ip, user_agent).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, target)]))
}
