//! Event ingestion service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::entities::{AuthContext, NewEvent};
use crate::domain::repositories::EventRepository;
use crate::error::AppError;
use crate::utils::key_generator::generate_id;

/// A validated ingestion request, before server-side enrichment.
#[derive(Debug, Clone)]
pub struct IncomingEvent {
    pub event_name: String,
    pub user_id: String,
    pub session_id: Option<String>,
    pub device_type: Option<String>,
    pub os: Option<String>,
    pub browser: Option<String>,
    pub properties: Option<Value>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Service for persisting analytics events.
///
/// One write per request; no deduplication, no batching, no retry.
pub struct IngestService {
    events: Arc<dyn EventRepository>,
}

impl IngestService {
    /// Creates a new ingestion service.
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    /// Validates and persists one event on behalf of the authenticated
    /// caller.
    ///
    /// The caller's IP and user agent are captured server-side; the event
    /// timestamp is client-controllable and defaults to ingestion time.
    ///
    /// # Returns
    ///
    /// The generated event id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] when `event_name` or `user_id` is
    /// empty after trimming. Returns [`AppError::Internal`] on database
    /// errors.
    pub async fn collect(
        &self,
        ctx: &AuthContext,
        incoming: IncomingEvent,
        ip: Option<String>,
        user_agent: Option<String>,
    ) -> Result<String, AppError> {
        let event_name = incoming.event_name.trim();
        if event_name.is_empty() {
            return Err(AppError::bad_request("event_name is required"));
        }

        let user_id = incoming.user_id.trim();
        if user_id.is_empty() {
            return Err(AppError::bad_request("user_id is required"));
        }

        // The properties document is opaque; it is stored verbatim as text.
        let properties = incoming
            .properties
            .as_ref()
            .map(Value::to_string)
            .unwrap_or_else(|| "{}".to_string());

        let new_event = NewEvent {
            id: generate_id(),
            app_id: ctx.app_id.clone(),
            api_key_id: ctx.api_key_id.clone(),
            event_name: event_name.to_string(),
            user_id: user_id.to_string(),
            session_id: incoming.session_id,
            device_type: incoming.device_type,
            os: incoming.os,
            browser: incoming.browser,
            ip,
            user_agent,
            properties,
            event_time: incoming.timestamp.unwrap_or_else(Utc::now),
        };

        let event_id = self.events.insert(new_event).await?;

        tracing::debug!(event_id = %event_id, event_name = %event_name, "Ingested event");
        Ok(event_id)
    }
}
