//! Short link creation and redirect resolution.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use url::Url;

use crate::domain::entities::{NewEvent, NewShortLink, ShortLink};
use crate::domain::repositories::{ApiKeyRepository, EventRepository, ShortLinkRepository};
use crate::error::AppError;
use crate::utils::key_generator::{generate_id, generate_slug};

/// Event name attached to synthetic redirect events.
const CLICK_EVENT_NAME: &str = "short_url_click";

/// User id recorded on click events, which have no authenticated end user.
const CLICK_USER_ID: &str = "anonymous";

/// A freshly created short link as returned to the caller.
#[derive(Debug, Clone)]
pub struct CreatedLink {
    pub slug: String,
    pub short_url: String,
    pub original_url: String,
}

/// Service for the short link surface.
pub struct LinkService {
    links: Arc<dyn ShortLinkRepository>,
    keys: Arc<dyn ApiKeyRepository>,
    events: Arc<dyn EventRepository>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the public origin used to assemble short URLs, without a
    /// trailing slash.
    pub fn new(
        links: Arc<dyn ShortLinkRepository>,
        keys: Arc<dyn ApiKeyRepository>,
        events: Arc<dyn EventRepository>,
        base_url: String,
    ) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            links,
            keys,
            events,
            base_url,
        }
    }

    /// Creates a short link owned by `app_id`.
    ///
    /// A missing slug is generated from secure random bytes. Uniqueness is
    /// enforced by the store's constraint, so concurrent creations with the
    /// same slug resolve to exactly one winner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] when the URL does not parse or uses a
    /// scheme other than http/https, [`AppError::Conflict`] when the slug is
    /// taken, [`AppError::Internal`] on database errors.
    pub async fn shorten(
        &self,
        app_id: &str,
        target_url: &str,
        slug: Option<String>,
    ) -> Result<CreatedLink, AppError> {
        let parsed = Url::parse(target_url.trim())
            .map_err(|_| AppError::bad_request(format!("Invalid URL: {target_url}")))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::bad_request(format!(
                "Unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }

        let slug = match slug {
            Some(s) => {
                let s = s.trim().to_string();
                if s.is_empty() {
                    generate_slug()
                } else {
                    s
                }
            }
            None => generate_slug(),
        };

        let link = self
            .links
            .create(NewShortLink {
                id: generate_id(),
                app_id: app_id.to_string(),
                slug,
                original_url: parsed.to_string(),
            })
            .await?;

        tracing::info!(slug = %link.slug, app_id = %app_id, "Created short link");

        Ok(CreatedLink {
            short_url: format!("{}/s/{}", self.base_url, link.slug),
            slug: link.slug,
            original_url: link.original_url,
        })
    }

    /// Resolves a slug for redirecting, counting the click and attributing a
    /// synthetic `short_url_click` event to the owning application.
    ///
    /// The click counter update is a plain read-modify-write in the request
    /// path; concurrent redirects may lose increments. The synthetic event is
    /// skipped silently when the owning application has no active key, and
    /// event insert failures never block the redirect.
    ///
    /// # Returns
    ///
    /// The target URL to redirect to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown slug,
    /// [`AppError::Internal`] on database errors during resolution.
    pub async fn resolve(
        &self,
        slug: &str,
        ip: Option<String>,
        user_agent: Option<String>,
    ) -> Result<String, AppError> {
        let link = self
            .links
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Short link not found: {slug}")))?;

        self.links.increment_clicks(&link.id).await?;

        self.record_click(&link, ip, user_agent).await;

        Ok(link.original_url)
    }

    async fn record_click(&self, link: &ShortLink, ip: Option<String>, user_agent: Option<String>) {
        let key = match self.keys.find_active_for_app(&link.app_id).await {
            Ok(Some(key)) => key,
            Ok(None) => {
                tracing::debug!(
                    app_id = %link.app_id,
                    "No active API key, skipping click event"
                );
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to look up API key for click event");
                return;
            }
        };

        let properties = json!({
            "slug": link.slug,
            "original_url": link.original_url,
        });

        let event = NewEvent {
            id: generate_id(),
            app_id: link.app_id.clone(),
            api_key_id: key.id,
            event_name: CLICK_EVENT_NAME.to_string(),
            user_id: CLICK_USER_ID.to_string(),
            session_id: None,
            device_type: None,
            os: None,
            browser: None,
            ip,
            user_agent,
            properties: properties.to_string(),
            event_time: Utc::now(),
        };

        if let Err(e) = self.events.insert(event).await {
            tracing::warn!(error = %e, slug = %link.slug, "Failed to record click event");
        }
    }
}
