//! DTOs for API key lifecycle endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::MaskedKey;

/// Query parameters for the key listing endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct KeyListQuery {
    #[validate(length(min = 1, message = "app_id is required"))]
    pub app_id: String,
}

/// One API key in the listing, with the secret masked.
#[derive(Debug, Serialize)]
pub struct KeyListItem {
    pub id: String,
    pub api_key: String,
    pub is_revoked: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub app_name: String,
}

impl From<MaskedKey> for KeyListItem {
    fn from(key: MaskedKey) -> Self {
        Self {
            id: key.id,
            api_key: key.api_key,
            is_revoked: key.is_revoked,
            expires_at: key.expires_at,
            created_at: key.created_at,
            revoked_at: key.revoked_at,
            app_name: key.app_name,
        }
    }
}

/// Request to revoke one API key by id.
#[derive(Debug, Deserialize, Validate)]
pub struct RevokeRequest {
    #[validate(length(min = 1, message = "api_key_id is required"))]
    pub api_key_id: String,
}

/// Confirmation message for a completed revocation.
#[derive(Debug, Serialize)]
pub struct RevokeResponse {
    pub message: String,
}

/// Request to regenerate the API key of an application.
#[derive(Debug, Deserialize, Validate)]
pub struct RegenerateRequest {
    #[validate(length(min = 1, message = "app_id is required"))]
    pub app_id: String,
}

/// Response carrying the freshly issued API key.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateResponse {
    pub api_key: String,
}
