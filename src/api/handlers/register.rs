//! Handler for application registration.

use axum::{extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::dto::register::{RegisterRequest, RegisterResponse};
use crate::api::extract::Json;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new application and issues its first API key.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Response
///
/// `201 Created` with the application id and the full API key. The key is
/// never returned in full again.
///
/// # Errors
///
/// Returns 400 Bad Request when the name is missing or blank.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterResponse>>), AppError> {
    payload.validate()?;

    let registration = state
        .app_service
        .register(&payload.name, payload.description)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(RegisterResponse {
            app_id: registration.app_id,
            api_key: registration.api_key,
        })),
    ))
}
