//! API documentation.
//!
//! # Responsibilities
//! - Assemble the OpenAPI document from the annotated handlers
//! - Serve it as JSON and behind a Swagger UI page

pub mod openapi;
pub mod ui;

use std::sync::Arc;

use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};

use crate::config::DocsConfig;

pub use openapi::{build_openapi, ApiDoc};

/// Routes serving the document and the docs page. Empty when docs are disabled.
pub fn routes<S>(config: &DocsConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if !config.enabled {
        return Router::new();
    }

    let document = Arc::new(build_openapi(config));
    let page = ui::swagger_page(&config.title, &config.spec_path);

    Router::new()
        .route(
            &config.spec_path,
            get(move || {
                let document = document.clone();
                async move { Json(document.as_ref().clone()) }
            }),
        )
        .route(&config.ui_path, get(move || async move { Html(page) }))
}
