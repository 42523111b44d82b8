//! Handler for the user statistics endpoint.

use axum::extract::State;
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::dto::user_stats::UserStatsQuery;
use crate::api::extract::{Json, Query};
use crate::application::services::UserStatsReport;
use crate::error::AppError;
use crate::state::AppState;

/// Returns activity statistics for one user id.
///
/// # Endpoint
///
/// `GET /api/analytics/user-stats?user_id=&app_id?`
///
/// # Errors
///
/// Returns 404 Not Found when the user has no matching events.
pub async fn user_stats_handler(
    State(state): State<AppState>,
    Query(query): Query<UserStatsQuery>,
) -> Result<Json<ApiResponse<UserStatsReport>>, AppError> {
    query.validate()?;

    let stats = state
        .analytics_service
        .user_stats(&query.user_id, query.app_id.as_deref())
        .await?;

    Ok(Json(ApiResponse::new(stats)))
}
