//! Aggregation queries: cached event summaries and per-user statistics.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::SummaryFilter;
use crate::domain::repositories::EventRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// How many recent events the user-stats endpoint returns.
const RECENT_EVENTS_LIMIT: i64 = 10;

/// One device bucket in a summary report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceCount {
    pub device_type: String,
    pub count: i64,
}

/// The summary payload as cached and returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub event: String,
    pub app_id: Option<String>,
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: chrono::DateTime<chrono::Utc>,
    pub total_events: i64,
    pub unique_users: i64,
    pub devices: Vec<DeviceCount>,
}

/// A summary plus its provenance.
#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    /// Cached payloads are returned verbatim, not re-aggregated.
    pub report: Value,
    pub cached: bool,
}

/// One entry of the recent-events listing.
#[derive(Debug, Clone, Serialize)]
pub struct RecentEventView {
    pub event_name: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub properties: Value,
}

/// Per-user statistics payload.
#[derive(Debug, Clone, Serialize)]
pub struct UserStatsReport {
    pub user_id: String,
    pub app_id: Option<String>,
    pub total_events: i64,
    pub first_seen: chrono::DateTime<chrono::Utc>,
    pub last_seen: chrono::DateTime<chrono::Utc>,
    pub last_ip: Option<String>,
    pub recent_events: Vec<RecentEventView>,
}

/// Service for read-side analytics queries.
///
/// Summaries follow a cache-aside flow over the configured [`CacheService`];
/// every cache failure degrades to a direct database read.
pub struct AnalyticsService {
    events: Arc<dyn EventRepository>,
    cache: Arc<dyn CacheService>,
    cache_ttl_seconds: u64,
}

impl AnalyticsService {
    /// Creates a new analytics service.
    pub fn new(
        events: Arc<dyn EventRepository>,
        cache: Arc<dyn CacheService>,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            events,
            cache,
            cache_ttl_seconds,
        }
    }

    /// Computes the event summary for `filter`, serving from cache when a
    /// fresh entry exists.
    ///
    /// The cache key is deterministic over the resolved filter, so two
    /// requests that normalize to the same window share one entry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors. Cache errors are
    /// logged and never surfaced.
    pub async fn event_summary(&self, filter: SummaryFilter) -> Result<SummaryOutcome, AppError> {
        let cache_key = Self::summary_cache_key(&filter);

        if let Ok(Some(payload)) = self.cache.get(&cache_key).await
            && let Ok(report) = serde_json::from_str::<Value>(&payload)
        {
            tracing::debug!(key = %cache_key, "Summary cache hit");
            return Ok(SummaryOutcome {
                report,
                cached: true,
            });
        }

        let devices = self.events.device_breakdown(&filter).await?;
        let unique_users = self.events.unique_users(&filter).await?;

        let total_events: i64 = devices.iter().map(|b| b.count).sum();
        let report = SummaryReport {
            event: filter.event_name.clone(),
            app_id: filter.app_id.clone(),
            start_date: filter.start,
            end_date: filter.end,
            total_events,
            unique_users,
            devices: devices
                .into_iter()
                .map(|b| DeviceCount {
                    device_type: b.device_type,
                    count: b.count,
                })
                .collect(),
        };

        let report = serde_json::to_value(&report)
            .map_err(|e| AppError::internal(format!("Failed to serialize summary: {}", e)))?;

        if let Ok(payload) = serde_json::to_string(&report) {
            // Best effort; a failed write leaves the next request to recompute.
            let _ = self
                .cache
                .set(&cache_key, &payload, Some(self.cache_ttl_seconds))
                .await;
        }

        Ok(SummaryOutcome {
            report,
            cached: false,
        })
    }

    /// Statistics for one user: totals, activity bounds, latest IP, and the
    /// most recent events.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the user has no matching events,
    /// [`AppError::Internal`] on database errors.
    pub async fn user_stats(
        &self,
        user_id: &str,
        app_id: Option<&str>,
    ) -> Result<UserStatsReport, AppError> {
        let overview = self
            .events
            .user_overview(user_id, app_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No events found for user: {user_id}")))?;

        let recent = self
            .events
            .recent_events(user_id, app_id, RECENT_EVENTS_LIMIT)
            .await?;

        let recent_events = recent
            .into_iter()
            .map(|e| RecentEventView {
                event_name: e.event_name,
                timestamp: e.event_time,
                // Rows predating strict serialization may hold junk text.
                properties: serde_json::from_str(&e.properties)
                    .unwrap_or(Value::Object(Default::default())),
            })
            .collect();

        Ok(UserStatsReport {
            user_id: user_id.to_string(),
            app_id: app_id.map(str::to_string),
            total_events: overview.total_events,
            first_seen: overview.first_seen,
            last_seen: overview.last_seen,
            last_ip: overview.last_ip,
            recent_events,
        })
    }

    fn summary_cache_key(filter: &SummaryFilter) -> String {
        format!(
            "summary:{}:{}:{}:{}",
            filter.event_name,
            filter.app_id.as_deref().unwrap_or("all"),
            filter.start.timestamp(),
            filter.end.timestamp(),
        )
    }
}
