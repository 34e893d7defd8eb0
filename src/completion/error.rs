//! Chat completion errors.

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    /// No API key configured.
    #[error("completion API key is not configured")]
    MissingApiKey,

    /// Connection, TLS, timeout or body decoding failure.
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("completion provider returned {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    /// Provider answered 2xx without any choice.
    #[error("completion provider returned no choices")]
    EmptyChoices,
}
