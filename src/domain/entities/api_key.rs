//! API key entity - the bearer credential owned by an application.

use chrono::{DateTime, Utc};

/// A stored API key row.
///
/// Regeneration never mutates a key in place: a new row is inserted and all
/// previously active rows for the application are flipped to revoked.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKey {
    pub id: String,
    pub app_id: String,
    pub api_key: String,
    pub is_revoked: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl ApiKey {
    /// A key is usable iff it is not revoked and not past its expiry.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked && self.expires_at.is_none_or(|e| e > now)
    }
}

/// Input data for issuing a new API key.
#[derive(Debug, Clone)]
pub struct NewApiKey {
    pub id: String,
    pub app_id: String,
    pub api_key: String,
}

/// An API key row joined with its owning application name, as returned by
/// the listing endpoint.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKeyWithApp {
    pub id: String,
    pub app_id: String,
    pub api_key: String,
    pub is_revoked: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub app_name: String,
}

/// The authenticated caller context resolved from a presented API key.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub app_id: String,
    pub api_key_id: String,
    pub app_name: String,
}
