//! Handlers for the API key lifecycle endpoints.

use axum::extract::State;
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::extract::{Json, Query};
use crate::api::dto::keys::{
    KeyListItem, KeyListQuery, RegenerateRequest, RegenerateResponse, RevokeRequest,
    RevokeResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// Lists all API keys of an application, secrets masked.
///
/// # Endpoint
///
/// `GET /api/auth/api-key?app_id=`
///
/// Revoked keys appear with the literal placeholder `"revoked"` instead of
/// a masked secret.
pub async fn list_keys_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyListQuery>,
) -> Result<Json<ApiResponse<Vec<KeyListItem>>>, AppError> {
    query.validate()?;

    let keys = state.app_service.list_keys(&query.app_id).await?;

    Ok(Json(ApiResponse::new(
        keys.into_iter().map(KeyListItem::from).collect(),
    )))
}

/// Revokes one API key by id.
///
/// # Endpoint
///
/// `POST /api/auth/revoke`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown or already-revoked key id.
pub async fn revoke_handler(
    State(state): State<AppState>,
    Json(payload): Json<RevokeRequest>,
) -> Result<Json<ApiResponse<RevokeResponse>>, AppError> {
    payload.validate()?;

    state.app_service.revoke_key(&payload.api_key_id).await?;

    Ok(Json(ApiResponse::new(RevokeResponse {
        message: "API key revoked".to_string(),
    })))
}

/// Replaces the active API keys of an application with one fresh key.
///
/// # Endpoint
///
/// `POST /api/auth/regenerate`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown application id.
pub async fn regenerate_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegenerateRequest>,
) -> Result<Json<ApiResponse<RegenerateResponse>>, AppError> {
    payload.validate()?;

    let api_key = state.app_service.regenerate_key(&payload.app_id).await?;

    Ok(Json(ApiResponse::new(RegenerateResponse { api_key })))
}
