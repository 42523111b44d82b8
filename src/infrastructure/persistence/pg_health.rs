//! PostgreSQL liveness probe.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::state::DatabaseHealth;

/// Health probe running a trivial query on the shared pool.
pub struct PgDatabaseHealth {
    pool: Arc<PgPool>,
}

impl PgDatabaseHealth {
    /// Creates a new probe over a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseHealth for PgDatabaseHealth {
    async fn ping(&self) -> Result<(), String> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&*self.pool)
            .await
            .map(|_| ())
            .map_err(|e| format!("Database error: {}", e))
    }
}
