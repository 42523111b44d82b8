//! Short link entity - a slug to URL mapping with a click counter.

use chrono::{DateTime, Utc};

/// A stored short link.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShortLink {
    pub id: String,
    pub app_id: String,
    pub slug: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a short link.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub id: String,
    pub app_id: String,
    pub slug: String,
    pub original_url: String,
}
