//! Event entity - one immutable, timestamped analytics record.

use chrono::{DateTime, Utc};

/// Input data for persisting a new event.
///
/// The `properties` payload is an opaque JSON document serialized to text
/// before storage; no schema is imposed.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub id: String,
    pub app_id: String,
    pub api_key_id: String,
    pub event_name: String,
    pub user_id: String,
    pub session_id: Option<String>,
    pub device_type: Option<String>,
    pub os: Option<String>,
    pub browser: Option<String>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub properties: String,
    pub event_time: DateTime<Utc>,
}

/// Per-device-type bucket within an event summary.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct DeviceBucket {
    pub device_type: String,
    pub count: i64,
}

/// Filter shared by the summary queries: name, window, optional tenant scope.
#[derive(Debug, Clone)]
pub struct SummaryFilter {
    pub event_name: String,
    pub app_id: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Aggregate figures for one user across the optional application scope.
#[derive(Debug, Clone)]
pub struct UserOverview {
    pub total_events: i64,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    /// IP of the most-recently-active IP group. An approximation: a user
    /// active from several addresses at once collapses to whichever group
    /// sorts last.
    pub last_ip: Option<String>,
}

/// One entry of the recent-events listing in user statistics.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecentEvent {
    pub event_name: String,
    pub event_time: DateTime<Utc>,
    pub properties: String,
}
