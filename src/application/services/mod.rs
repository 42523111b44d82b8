//! Application services - use case orchestration over the repositories.

pub mod analytics_service;
pub mod app_service;
pub mod auth_service;
pub mod ingest_service;
pub mod link_service;

pub use analytics_service::{AnalyticsService, SummaryOutcome, UserStatsReport};
pub use app_service::{AppService, MaskedKey, Registration};
pub use auth_service::AuthService;
pub use ingest_service::{IncomingEvent, IngestService};
pub use link_service::{CreatedLink, LinkService};
