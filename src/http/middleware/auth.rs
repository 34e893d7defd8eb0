//! Bearer token authentication for `/api/*`.

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::http::request::request_id;
use crate::http::response::ApiError;
use crate::http::server::AppState;

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|t| !t.is_empty())
}

pub async fn bearer_auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if bearer_token(request.headers()) == Some(state.config.auth.token.as_str()) {
        return next.run(request).await;
    }

    tracing::warn!(
        request_id = %request_id(request.headers()),
        path = %request.uri().path(),
        "Rejected request with missing or invalid bearer token"
    );
    let mut response = ApiError::unauthorized().into_response();
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    response
}
