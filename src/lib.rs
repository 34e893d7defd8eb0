//! Quickstart HTTP API library.

pub mod completion;
pub mod config;
pub mod docs;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod routes;
pub mod schemas;

pub use config::ApiConfig;
pub use http::ApiServer;
pub use lifecycle::Shutdown;
pub use resilience::{BoundedRunner, Outcome, TimeoutFailure};
