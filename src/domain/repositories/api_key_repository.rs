//! Repository trait for API key lookup and lifecycle.

use crate::domain::entities::{ApiKey, ApiKeyWithApp, NewApiKey};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for API key management.
///
/// Keys are stored verbatim; the listing endpoint masks them before they
/// leave the service. Revocation and regeneration never mutate a secret in
/// place.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgApiKeyRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    /// Resolves a presented secret to its row joined with the owning
    /// application, filtered to non-revoked and non-expired keys.
    ///
    /// Returns `Ok(None)` when no usable key matches; the caller must not be
    /// able to tell missing, revoked, and expired apart.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_usable(&self, api_key: &str) -> Result<Option<ApiKeyWithApp>, AppError>;

    /// Lists every key row for an application, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_for_app(&self, app_id: &str) -> Result<Vec<ApiKeyWithApp>, AppError>;

    /// Revokes a key by id, stamping the revocation time.
    ///
    /// The predicate includes `is_revoked = false`, so revoking an
    /// already-revoked key matches zero rows.
    ///
    /// # Returns
    ///
    /// `true` when a row was revoked, `false` when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn revoke(&self, api_key_id: &str) -> Result<bool, AppError>;

    /// Revokes every active key for an application and inserts one fresh
    /// key, all inside a single transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors; the transaction is
    /// rolled back.
    async fn regenerate(&self, app_id: &str, new_key: NewApiKey) -> Result<ApiKey, AppError>;

    /// Finds one currently usable key for an application, if any.
    ///
    /// Used to attribute synthetic short-link click events.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_active_for_app(&self, app_id: &str) -> Result<Option<ApiKey>, AppError>;
}
