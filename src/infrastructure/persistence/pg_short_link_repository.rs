//! PostgreSQL implementation of the short link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for slug to URL mappings.
///
/// Slug uniqueness relies on the `short_links.slug` unique constraint; the
/// violation is mapped to a conflict error instead of a racy pre-check.
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let link = sqlx::query_as::<_, ShortLink>(
            r#"
            INSERT INTO short_links (id, app_id, slug, original_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, app_id, slug, original_url, clicks, created_at, updated_at
            "#,
        )
        .bind(&new_link.id)
        .bind(&new_link.app_id)
        .bind(&new_link.slug)
        .bind(&new_link.original_url)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => {
                AppError::conflict(format!("Slug already exists: {}", new_link.slug))
            }
            _ => e.into(),
        })?;

        Ok(link)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortLink>, AppError> {
        let link = sqlx::query_as::<_, ShortLink>(
            r#"
            SELECT id, app_id, slug, original_url, clicks, created_at, updated_at
            FROM short_links
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn increment_clicks(&self, link_id: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE short_links
            SET clicks = clicks + 1, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(link_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
