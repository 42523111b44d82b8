//! PostgreSQL repository implementations.
//!
//! Each repository wraps a shared connection pool and implements the
//! corresponding trait from `crate::domain::repositories`.

mod pg_api_key_repository;
mod pg_application_repository;
mod pg_event_repository;
mod pg_health;
mod pg_short_link_repository;

pub use pg_api_key_repository::PgApiKeyRepository;
pub use pg_application_repository::PgApplicationRepository;
pub use pg_event_repository::PgEventRepository;
pub use pg_health::PgDatabaseHealth;
pub use pg_short_link_repository::PgShortLinkRepository;
