//! HTTP middleware.

pub mod auth;
pub mod metrics;

pub use auth::bearer_auth;
pub use metrics::track_metrics;
