//! DTOs for application registration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to register a new application.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name of the application.
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,

    /// Optional free-form description.
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// Response carrying the new application's id and its API key.
///
/// The key is shown in full exactly once, here; every later listing masks it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub app_id: String,
    pub api_key: String,
}
