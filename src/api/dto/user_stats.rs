//! DTOs for the user statistics endpoint.

use serde::Deserialize;
use validator::Validate;

/// Query parameters for the user statistics endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct UserStatsQuery {
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,

    #[serde(alias = "appId")]
    pub app_id: Option<String>,
}
