//! Authentication service for API key validation.

use std::sync::Arc;

use crate::domain::entities::AuthContext;
use crate::domain::repositories::ApiKeyRepository;
use crate::error::AppError;

/// Service for authenticating requests via the API key header.
///
/// Validation always hits the store; there is no session or token caching
/// beyond what the database's own query cache provides.
pub struct AuthService {
    keys: Arc<dyn ApiKeyRepository>,
}

impl AuthService {
    /// Creates a new authentication service.
    pub fn new(keys: Arc<dyn ApiKeyRepository>) -> Self {
        Self { keys }
    }

    /// Authenticates a presented API key.
    ///
    /// On success returns the authenticated context for downstream handlers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] with a deliberately generic
    /// message when the key is unknown, revoked, or expired; the caller can
    /// never tell which. Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, api_key: &str) -> Result<AuthContext, AppError> {
        let row = self
            .keys
            .find_usable(api_key)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid API key"))?;

        Ok(AuthContext {
            app_id: row.app_id,
            api_key_id: row.id,
            app_name: row.app_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ApiKeyWithApp;
    use crate::domain::repositories::MockApiKeyRepository;
    use chrono::Utc;

    fn usable_row(api_key: &str) -> ApiKeyWithApp {
        ApiKeyWithApp {
            id: "key-1".to_string(),
            app_id: "app-1".to_string(),
            api_key: api_key.to_string(),
            is_revoked: false,
            expires_at: None,
            created_at: Utc::now(),
            revoked_at: None,
            app_name: "Test App".to_string(),
        }
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut mock_repo = MockApiKeyRepository::new();

        mock_repo
            .expect_find_usable()
            .withf(|key| key == "pm_valid")
            .times(1)
            .returning(|key| Ok(Some(usable_row(key))));

        let service = AuthService::new(Arc::new(mock_repo));

        let ctx = service.authenticate("pm_valid").await.unwrap();
        assert_eq!(ctx.app_id, "app-1");
        assert_eq!(ctx.api_key_id, "key-1");
        assert_eq!(ctx.app_name, "Test App");
    }

    #[tokio::test]
    async fn test_authenticate_unknown_key() {
        let mut mock_repo = MockApiKeyRepository::new();

        mock_repo
            .expect_find_usable()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo));

        let result = service.authenticate("pm_unknown").await;
        assert!(matches!(result.unwrap_err(), AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_authenticate_generic_message() {
        // The repository already filters out revoked and expired keys, so
        // every rejection carries the same message.
        let mut mock_repo = MockApiKeyRepository::new();

        mock_repo
            .expect_find_usable()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo));

        let err = service.authenticate("pm_revoked").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid API key");
    }
}
