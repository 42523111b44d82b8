//! Handler for event ingestion.

use axum::{
    Extension,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::dto::collect::{CollectRequest, CollectResponse};
use crate::api::extract::{ClientIp, Json};
use crate::application::services::IncomingEvent;
use crate::domain::entities::AuthContext;
use crate::error::AppError;
use crate::state::AppState;

/// Ingests one analytics event for the authenticated application.
///
/// # Endpoint
///
/// `POST /api/analytics/collect` (requires `x-api-key`)
///
/// The client IP and user agent are captured server-side. The event
/// timestamp may be supplied by the client and defaults to now.
///
/// # Errors
///
/// Returns 400 Bad Request when `event_name` or `user_id` is missing or
/// blank, 401 Unauthorized without a usable API key.
pub async fn collect_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    ClientIp(ip): ClientIp,
    headers: HeaderMap,
    Json(payload): Json<CollectRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CollectResponse>>), AppError> {
    payload.validate()?;

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let incoming = IncomingEvent {
        event_name: payload.event_name,
        user_id: payload.user_id,
        session_id: payload.session_id,
        device_type: payload.device_type,
        os: payload.os,
        browser: payload.browser,
        properties: payload.properties,
        timestamp: payload.timestamp,
    };

    let event_id = state
        .ingest_service
        .collect(&ctx, incoming, ip, user_agent)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(CollectResponse { event_id })),
    ))
}
