//! DTOs for the event ingestion endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Request body for ingesting one analytics event.
///
/// `properties` is an arbitrary JSON object stored verbatim; no schema is
/// imposed on it.
#[derive(Debug, Deserialize, Validate)]
pub struct CollectRequest {
    #[validate(length(min = 1, max = 255, message = "event_name is required"))]
    pub event_name: String,

    #[validate(length(min = 1, max = 255, message = "user_id is required"))]
    pub user_id: String,

    pub session_id: Option<String>,
    pub device_type: Option<String>,
    pub os: Option<String>,
    pub browser: Option<String>,
    pub properties: Option<Value>,

    /// Client-supplied event time. Defaults to ingestion time when absent.
    pub timestamp: Option<DateTime<Utc>>,
}

/// Response carrying the id of the stored event.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectResponse {
    pub event_id: String,
}
