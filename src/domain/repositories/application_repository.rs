//! Repository trait for application registration.

use crate::domain::entities::{ApiKey, Application, NewApiKey, NewApplication};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for application records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgApplicationRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Inserts an application and its first API key in a single transaction.
    ///
    /// Either both rows become visible or neither does.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors; the transaction is
    /// rolled back.
    async fn create_with_key(
        &self,
        new_app: NewApplication,
        new_key: NewApiKey,
    ) -> Result<(Application, ApiKey), AppError>;

    /// Finds an application by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, app_id: &str) -> Result<Option<Application>, AppError>;
}
