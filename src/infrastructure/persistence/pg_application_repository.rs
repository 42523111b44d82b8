//! PostgreSQL implementation of the application repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ApiKey, Application, NewApiKey, NewApplication};
use crate::domain::repositories::ApplicationRepository;
use crate::error::AppError;

/// PostgreSQL repository for application records.
pub struct PgApplicationRepository {
    pool: Arc<PgPool>,
}

impl PgApplicationRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    async fn create_with_key(
        &self,
        new_app: NewApplication,
        new_key: NewApiKey,
    ) -> Result<(Application, ApiKey), AppError> {
        let mut tx = self.pool.begin().await?;

        let app = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO apps (id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(&new_app.id)
        .bind(&new_app.name)
        .bind(&new_app.description)
        .fetch_one(&mut *tx)
        .await?;

        let key = sqlx::query_as::<_, ApiKey>(
            r#"
            INSERT INTO api_keys (id, app_id, api_key)
            VALUES ($1, $2, $3)
            RETURNING id, app_id, api_key, is_revoked, expires_at, created_at, revoked_at
            "#,
        )
        .bind(&new_key.id)
        .bind(&new_key.app_id)
        .bind(&new_key.api_key)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((app, key))
    }

    async fn find_by_id(&self, app_id: &str) -> Result<Option<Application>, AppError> {
        let app = sqlx::query_as::<_, Application>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM apps
            WHERE id = $1
            "#,
        )
        .bind(app_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(app)
    }
}
