//! Application registration and API key lifecycle service.

use std::sync::Arc;

use crate::domain::entities::{NewApiKey, NewApplication};
use crate::domain::repositories::{ApiKeyRepository, ApplicationRepository};
use crate::error::AppError;
use crate::utils::key_generator::{
    REVOKED_KEY_PLACEHOLDER, generate_api_key, generate_id, mask_api_key,
};
use chrono::{DateTime, Utc};

/// A registered application together with its first raw API key.
///
/// The raw key appears in exactly one response and is never retrievable
/// again.
#[derive(Debug, Clone)]
pub struct Registration {
    pub app_id: String,
    pub api_key: String,
}

/// One entry of the key-listing operation, with the secret already masked.
#[derive(Debug, Clone)]
pub struct MaskedKey {
    pub id: String,
    pub api_key: String,
    pub is_revoked: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub app_name: String,
}

/// Service for registering applications and managing their API keys.
pub struct AppService {
    apps: Arc<dyn ApplicationRepository>,
    keys: Arc<dyn ApiKeyRepository>,
}

impl AppService {
    /// Creates a new application service.
    pub fn new(apps: Arc<dyn ApplicationRepository>, keys: Arc<dyn ApiKeyRepository>) -> Self {
        Self { apps, keys }
    }

    /// Registers a new application and issues its first API key.
    ///
    /// The application row and the key row are inserted in one transaction;
    /// a failure leaves no partial state.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] when the name is empty after
    /// trimming. Returns [`AppError::Internal`] on database errors.
    pub async fn register(
        &self,
        name: &str,
        description: Option<String>,
    ) -> Result<Registration, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::bad_request("Application name is required"));
        }

        let app_id = generate_id();
        let api_key = generate_api_key();

        let new_app = NewApplication {
            id: app_id.clone(),
            name: name.to_string(),
            description,
        };
        let new_key = NewApiKey {
            id: generate_id(),
            app_id: app_id.clone(),
            api_key: api_key.clone(),
        };

        let (app, _key) = self.apps.create_with_key(new_app, new_key).await?;

        tracing::info!(app_id = %app.id, name = %app.name, "Registered application");

        Ok(Registration {
            app_id: app.id,
            api_key,
        })
    }

    /// Lists every key for an application, newest first, secrets masked.
    ///
    /// Revoked keys show a fixed placeholder instead of a masked secret.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_keys(&self, app_id: &str) -> Result<Vec<MaskedKey>, AppError> {
        let rows = self.keys.list_for_app(app_id).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let api_key = if row.is_revoked {
                    REVOKED_KEY_PLACEHOLDER.to_string()
                } else {
                    mask_api_key(&row.api_key)
                };

                MaskedKey {
                    id: row.id,
                    api_key,
                    is_revoked: row.is_revoked,
                    expires_at: row.expires_at,
                    created_at: row.created_at,
                    revoked_at: row.revoked_at,
                    app_name: row.app_name,
                }
            })
            .collect())
    }

    /// Revokes a single key by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no active key matched, which
    /// includes revoking the same key twice.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn revoke_key(&self, api_key_id: &str) -> Result<(), AppError> {
        let revoked = self.keys.revoke(api_key_id).await?;

        if !revoked {
            return Err(AppError::not_found("API key not found"));
        }

        tracing::info!(api_key_id = %api_key_id, "Revoked API key");
        Ok(())
    }

    /// Revokes all active keys of an application and issues one new key.
    ///
    /// Returns only the new raw secret.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the application does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn regenerate_key(&self, app_id: &str) -> Result<String, AppError> {
        if self.apps.find_by_id(app_id).await?.is_none() {
            return Err(AppError::not_found("Application not found"));
        }

        let new_key = NewApiKey {
            id: generate_id(),
            app_id: app_id.to_string(),
            api_key: generate_api_key(),
        };

        let key = self.keys.regenerate(app_id, new_key).await?;

        tracing::info!(app_id = %app_id, "Regenerated API key");
        Ok(key.api_key)
    }
}
