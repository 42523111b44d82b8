//! PostgreSQL implementation of the event repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::{DeviceBucket, NewEvent, RecentEvent, SummaryFilter, UserOverview};
use crate::domain::repositories::EventRepository;
use crate::error::AppError;

/// PostgreSQL repository for the append-only event store.
pub struct PgEventRepository {
    pool: Arc<PgPool>,
}

impl PgEventRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn insert(&self, new_event: NewEvent) -> Result<String, AppError> {
        let id: String = sqlx::query_scalar(
            r#"
            INSERT INTO events
                (id, app_id, api_key_id, event_name, user_id, session_id,
                 device_type, os, browser, ip, user_agent, properties, event_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            "#,
        )
        .bind(&new_event.id)
        .bind(&new_event.app_id)
        .bind(&new_event.api_key_id)
        .bind(&new_event.event_name)
        .bind(&new_event.user_id)
        .bind(&new_event.session_id)
        .bind(&new_event.device_type)
        .bind(&new_event.os)
        .bind(&new_event.browser)
        .bind(&new_event.ip)
        .bind(&new_event.user_agent)
        .bind(&new_event.properties)
        .bind(new_event.event_time)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(id)
    }

    async fn device_breakdown(
        &self,
        filter: &SummaryFilter,
    ) -> Result<Vec<DeviceBucket>, AppError> {
        let buckets = sqlx::query_as::<_, DeviceBucket>(
            r#"
            SELECT COALESCE(NULLIF(TRIM(device_type), ''), 'unknown') AS device_type,
                   COUNT(*) AS count
            FROM events
            WHERE event_name = $1
              AND event_time >= $2
              AND event_time <= $3
              AND ($4::text IS NULL OR app_id = $4)
            GROUP BY 1
            ORDER BY count DESC, device_type
            "#,
        )
        .bind(&filter.event_name)
        .bind(filter.start)
        .bind(filter.end)
        .bind(filter.app_id.as_deref())
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(buckets)
    }

    async fn unique_users(&self, filter: &SummaryFilter) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT user_id)
            FROM events
            WHERE event_name = $1
              AND event_time >= $2
              AND event_time <= $3
              AND ($4::text IS NULL OR app_id = $4)
            "#,
        )
        .bind(&filter.event_name)
        .bind(filter.start)
        .bind(filter.end)
        .bind(filter.app_id.as_deref())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn user_overview<'a>(
        &self,
        user_id: &str,
        app_id: Option<&'a str>,
    ) -> Result<Option<UserOverview>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total_events,
                   MIN(event_time) AS first_seen,
                   MAX(event_time) AS last_seen
            FROM events
            WHERE user_id = $1
              AND ($2::text IS NULL OR app_id = $2)
            "#,
        )
        .bind(user_id)
        .bind(app_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        let total_events: i64 = row.try_get("total_events").map_err(sqlx::Error::from)?;
        if total_events == 0 {
            return Ok(None);
        }

        let first_seen: DateTime<Utc> = row.try_get("first_seen").map_err(sqlx::Error::from)?;
        let last_seen: DateTime<Utc> = row.try_get("last_seen").map_err(sqlx::Error::from)?;

        // The "last known IP" is the IP group with the most recent activity,
        // not necessarily the IP of the single latest event.
        let last_ip: Option<String> = sqlx::query_scalar(
            r#"
            SELECT ip
            FROM events
            WHERE user_id = $1
              AND ($2::text IS NULL OR app_id = $2)
              AND ip IS NOT NULL
            GROUP BY ip
            ORDER BY MAX(event_time) DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(app_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(Some(UserOverview {
            total_events,
            first_seen,
            last_seen,
            last_ip,
        }))
    }

    async fn recent_events<'a>(
        &self,
        user_id: &str,
        app_id: Option<&'a str>,
        limit: i64,
    ) -> Result<Vec<RecentEvent>, AppError> {
        let events = sqlx::query_as::<_, RecentEvent>(
            r#"
            SELECT event_name, event_time, properties
            FROM events
            WHERE user_id = $1
              AND ($2::text IS NULL OR app_id = $2)
            ORDER BY event_time DESC
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(app_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(events)
    }
}
