//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, typed body extraction)
//!     → middleware/ (bearer auth on /api/*, per-route metrics)
//!     → routes/ (handlers, bounded operations)
//!     → response.rs (failures rendered as {"message": ...})
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, MakeRequestUuid, ValidJson, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{ApiServer, AppState};
