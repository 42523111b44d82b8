//! PostgreSQL implementation of the API key repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ApiKey, ApiKeyWithApp, NewApiKey};
use crate::domain::repositories::ApiKeyRepository;
use crate::error::AppError;

/// PostgreSQL repository for API key storage and lookup.
pub struct PgApiKeyRepository {
    pool: Arc<PgPool>,
}

impl PgApiKeyRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiKeyRepository for PgApiKeyRepository {
    async fn find_usable(&self, api_key: &str) -> Result<Option<ApiKeyWithApp>, AppError> {
        let row = sqlx::query_as::<_, ApiKeyWithApp>(
            r#"
            SELECT k.id, k.app_id, k.api_key, k.is_revoked, k.expires_at,
                   k.created_at, k.revoked_at, a.name AS app_name
            FROM api_keys k
            JOIN apps a ON a.id = k.app_id
            WHERE k.api_key = $1
              AND k.is_revoked = FALSE
              AND (k.expires_at IS NULL OR k.expires_at > NOW())
            "#,
        )
        .bind(api_key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn list_for_app(&self, app_id: &str) -> Result<Vec<ApiKeyWithApp>, AppError> {
        let rows = sqlx::query_as::<_, ApiKeyWithApp>(
            r#"
            SELECT k.id, k.app_id, k.api_key, k.is_revoked, k.expires_at,
                   k.created_at, k.revoked_at, a.name AS app_name
            FROM api_keys k
            JOIN apps a ON a.id = k.app_id
            WHERE k.app_id = $1
            ORDER BY k.created_at DESC
            "#,
        )
        .bind(app_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn revoke(&self, api_key_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE api_keys
            SET is_revoked = TRUE, revoked_at = NOW()
            WHERE id = $1 AND is_revoked = FALSE
            "#,
        )
        .bind(api_key_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn regenerate(&self, app_id: &str, new_key: NewApiKey) -> Result<ApiKey, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE api_keys
            SET is_revoked = TRUE, revoked_at = NOW()
            WHERE app_id = $1 AND is_revoked = FALSE
            "#,
        )
        .bind(app_id)
        .execute(&mut *tx)
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

        Ok(key)
    }

    async fn find_active_for_app(&self, app_id: &str) -> Result<Option<ApiKey>, AppError> {
        let key = sqlx::query_as::<_, ApiKey>(
            r#"
            SELECT id, app_id, api_key, is_revoked, expires_at, created_at, revoked_at
            FROM api_keys
            WHERE app_id = $1
              AND is_revoked = FALSE
              AND (expires_at IS NULL OR expires_at > NOW())
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(app_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(key)
    }
}
