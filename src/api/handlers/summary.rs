//! Handler for the event summary endpoint.

use axum::extract::State;
use serde_json::Value;
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::dto::summary::SummaryQuery;
use crate::api::extract::{Json, Query};
use crate::domain::entities::SummaryFilter;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::date_range::resolve_range;

/// Returns the aggregated summary for one event name over a date window.
///
/// # Endpoint
///
/// `GET /api/analytics/event-summary?event=&start_date?&end_date?&app_id?`
///
/// The window defaults to the last seven days ending now. Results are served
/// from cache when a fresh entry exists; the envelope's `cached` flag tells
/// which path was taken.
///
/// # Errors
///
/// Returns 400 Bad Request for an unparseable date or an inverted range.
pub async fn summary_handler(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    query.validate()?;

    let (start, end) = resolve_range(query.start_date.as_deref(), query.end_date.as_deref())?;

    let filter = SummaryFilter {
        event_name: query.event,
        app_id: query.app_id,
        start,
        end,
    };

    let outcome = state.analytics_service.event_summary(filter).await?;

    Ok(Json(ApiResponse::with_cached(
        outcome.report,
        outcome.cached,
    )))
}
