//! DTOs for the event summary endpoint.

use serde::Deserialize;
use validator::Validate;

/// Query parameters for the event summary endpoint.
///
/// Dates accept RFC 3339 or plain `YYYY-MM-DD`; both snake_case and
/// camelCase parameter names are recognized.
#[derive(Debug, Deserialize, Validate)]
pub struct SummaryQuery {
    #[validate(length(min = 1, message = "event is required"))]
    pub event: String,

    #[serde(alias = "startDate")]
    pub start_date: Option<String>,

    #[serde(alias = "endDate")]
    pub end_date: Option<String>,

    #[serde(alias = "appId")]
    pub app_id: Option<String>,
}
