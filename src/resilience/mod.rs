//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Handler builds a task (slow backend call, completion request, ...)
//!     → timeouts.rs (race the task against the global budget)
//!     → Outcome: Success | Timeout | TaskFailure
//!     → handler maps the outcome to a response
//! ```
//!
//! # Design Decisions
//! - Every slow call made on behalf of a request has a deadline
//! - The deadline bounds the caller's wait, not the callee's work
//! - Timeout errors are distinct from task errors

pub mod timeouts;

pub use timeouts::{BoundedRunner, Outcome, TimeoutFailure};
