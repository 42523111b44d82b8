//! Handler for the link shortening endpoint.

use axum::{Extension, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::extract::Json;
use crate::domain::entities::AuthContext;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link owned by the authenticated application.
///
/// # Endpoint
///
/// `POST /api/shorten` (requires `x-api-key`)
///
/// # Errors
///
/// Returns 400 Bad Request for an invalid URL or slug, 409 Conflict when
/// the slug is already taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ShortenResponse>>), AppError> {
    payload.validate()?;

    let created = state
        .link_service
        .shorten(&ctx.app_id, &payload.url, payload.slug)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(ShortenResponse {
            slug: created.slug,
            short_url: created.short_url,
            original_url: created.original_url,
        })),
    ))
}
