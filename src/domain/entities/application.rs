//! Application entity - the tenant that owns keys, events, and short links.

use chrono::{DateTime, Utc};

/// A registered application.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Application {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for registering a new application.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}
