//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; concrete implementations
//! live in `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`ApplicationRepository`] - Application registration
//! - [`ApiKeyRepository`] - API key lookup and lifecycle
//! - [`EventRepository`] - Event persistence and aggregation
//! - [`ShortLinkRepository`] - Short link storage

pub mod api_key_repository;
pub mod application_repository;
pub mod event_repository;
pub mod short_link_repository;

pub use api_key_repository::ApiKeyRepository;
pub use application_repository::ApplicationRepository;
pub use event_repository::EventRepository;
pub use short_link_repository::ShortLinkRepository;

#[cfg(test)]
pub use api_key_repository::MockApiKeyRepository;
#[cfg(test)]
pub use application_repository::MockApplicationRepository;
#[cfg(test)]
pub use event_repository::MockEventRepository;
#[cfg(test)]
pub use short_link_repository::MockShortLinkRepository;
