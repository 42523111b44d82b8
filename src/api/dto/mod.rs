//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod collect;
pub mod health;
pub mod keys;
pub mod register;
pub mod shorten;
pub mod summary;
pub mod user_stats;

use serde::Serialize;

/// Uniform success envelope wrapping every 2xx JSON body.
///
/// The `cached` flag is only present on responses that can be served from
/// cache.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
}

impl<T> ApiResponse<T> {
    /// Wraps a payload in the success envelope.
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            cached: None,
        }
    }

    /// Wraps a payload and marks whether it was served from cache.
    pub fn with_cached(data: T, cached: bool) -> Self {
        Self {
            success: true,
            data,
            cached: Some(cached),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_omits_cached_by_default() {
        let body = serde_json::to_value(ApiResponse::new(json!({"id": 1}))).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["id"], 1);
        assert!(body.get("cached").is_none());
    }

    #[test]
    fn test_envelope_carries_cached_flag() {
        let body =
            serde_json::to_value(ApiResponse::with_cached(json!({}), true)).unwrap();
        assert_eq!(body["cached"], true);
    }
}
