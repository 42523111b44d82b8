//! Repository trait for event persistence and aggregation queries.

use crate::domain::entities::{DeviceBucket, NewEvent, RecentEvent, SummaryFilter, UserOverview};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the append-only event store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgEventRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persists one event row. Events are immutable once written.
    ///
    /// # Returns
    ///
    /// The generated event id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors. Failed inserts are
    /// not retried.
    async fn insert(&self, new_event: NewEvent) -> Result<String, AppError>;

    /// Counts matching events grouped by device type.
    ///
    /// Empty or null device types are normalized to the literal `"unknown"`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn device_breakdown(&self, filter: &SummaryFilter)
    -> Result<Vec<DeviceBucket>, AppError>;

    /// Exact distinct-user count over the same filter as
    /// [`Self::device_breakdown`].
    ///
    /// Kept as a separate query because per-group counts cannot be combined
    /// into a global distinct figure (a user may appear in several device
    /// groups).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn unique_users(&self, filter: &SummaryFilter) -> Result<i64, AppError>;

    /// Aggregate figures for a user: total events, first/last seen, and the
    /// IP of the most-recently-active IP group.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the user has no matching events.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn user_overview<'a>(
        &self,
        user_id: &str,
        app_id: Option<&'a str>,
    ) -> Result<Option<UserOverview>, AppError>;

    /// The most recent events for a user, newest first, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn recent_events<'a>(
        &self,
        user_id: &str,
        app_id: Option<&'a str>,
        limit: i64,
    ) -> Result<Vec<RecentEvent>, AppError>;
}
