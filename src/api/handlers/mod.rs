//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod collect;
pub mod health;
pub mod keys;
pub mod redirect;
pub mod register;
pub mod shorten;
pub mod summary;
pub mod user_stats;

pub use collect::collect_handler;
pub use health::health_handler;
pub use keys::{list_keys_handler, regenerate_handler, revoke_handler};
pub use redirect::redirect_handler;
pub use register::register_handler;
pub use shorten::shorten_handler;
pub use summary::summary_handler;
pub use user_stats::user_stats_handler;
