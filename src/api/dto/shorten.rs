//! DTOs for the link shortening endpoint.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for caller-supplied slug validation.
static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Request to create a short link.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The target URL (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional caller-supplied slug; generated when absent.
    #[validate(length(min = 1, max = 64))]
    #[validate(regex(path = "*SLUG_REGEX", message = "slug may contain [A-Za-z0-9_-] only"))]
    pub slug: Option<String>,
}

/// Response describing the created short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub slug: String,
    pub short_url: String,
    pub original_url: String,
}
