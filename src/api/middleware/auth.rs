//! API key authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, state::AppState};

/// Name of the credential header.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Authenticates requests using the `x-api-key` header.
///
/// On success the resolved [`crate::domain::entities::AuthContext`] is
/// inserted into the request extensions for downstream handlers.
///
/// # Errors
///
/// Returns `401 Unauthorized` when the header is missing, malformed, or does
/// not resolve to a usable key. The three cases are indistinguishable to the
/// caller.
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let api_key = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::unauthorized("Missing API key"))?
        .to_string();

    let ctx = st.auth_service.authenticate(&api_key).await?;

    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}
