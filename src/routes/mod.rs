//! Route table.
//!
//! # Routes
//! - `GET /hello`, `GET /hello/{name}`, `POST /hello` - greetings
//! - `POST /image` - multipart upload, answers with the byte count
//! - `GET /long-running-operation` - bounded dummy task
//! - `GET /api/hello` - bearer protected greeting
//! - `POST /api/completion` - bearer protected, bounded chat completion
//!
//! Docs routes are added by [`crate::docs::routes`].

pub mod completion;
pub mod hello;
pub mod image;
pub mod operation;
pub mod secure;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::http::middleware::bearer_auth;
use crate::http::response::ApiError;
use crate::http::server::AppState;

/// Build the application routes, protecting `/api/*` with the bearer token.
pub fn api_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/hello", get(hello::hello).post(hello::hello_post))
        .route("/hello/{name}", get(hello::hello_name))
        .route("/image", post(image::image_post))
        .route("/long-running-operation", get(operation::long_running_operation));

    let protected = Router::new()
        .route("/api/hello", get(secure::auth_hello))
        .route("/api/completion", post(completion::create_completion))
        .route_layer(middleware::from_fn_with_state(state, bearer_auth));

    public.merge(protected)
}

/// Current UTC time with millisecond precision, e.g. `2024-05-01T12:00:00.123Z`.
pub(crate) fn timestamp() -> Result<String, ApiError> {
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");
    OffsetDateTime::now_utc()
        .format(&format)
        .map_err(|e| ApiError::internal(format!("failed to format time: {e}")))
}
