//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Creation
//! follows the "New Type" pattern: `NewApplication`, `NewApiKey`,
//! `NewEvent`, `NewShortLink` carry the fields a caller supplies; the full
//! entity mirrors a stored row.

pub mod api_key;
pub mod application;
pub mod event;
pub mod short_link;

pub use api_key::{ApiKey, ApiKeyWithApp, AuthContext, NewApiKey};
pub use application::{Application, NewApplication};
pub use event::{DeviceBucket, NewEvent, RecentEvent, SummaryFilter, UserOverview};
pub use short_link::{NewShortLink, ShortLink};
