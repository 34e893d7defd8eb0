//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, metrics)
//! - Bind server to listener
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderValue, Request};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::completion::{ChatCompletion, CompletionError, OpenAiClient};
use crate::config::ApiConfig;
use crate::http::middleware::track_metrics;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::resilience::BoundedRunner;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub runner: BoundedRunner,
    pub completion: Arc<dyn ChatCompletion>,
}

impl AppState {
    pub fn new(config: ApiConfig, completion: Arc<dyn ChatCompletion>) -> Self {
        let runner = BoundedRunner::from_config(&config.timeouts);
        Self {
            config: Arc::new(config),
            runner,
            completion,
        }
    }
}

/// HTTP server for the API.
pub struct ApiServer {
    router: Router,
    config: Arc<ApiConfig>,
}

impl ApiServer {
    /// Create a server that talks to the configured completion provider.
    pub fn new(config: ApiConfig) -> Result<Self, CompletionError> {
        let completion = Arc::new(OpenAiClient::new(&config.completion)?);
        Ok(Self::with_completion(config, completion))
    }

    /// Create a server with a caller-supplied completion provider.
    pub fn with_completion(config: ApiConfig, completion: Arc<dyn ChatCompletion>) -> Self {
        let state = AppState::new(config, completion);
        let config = state.config.clone();
        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState) -> Router {
        let config = state.config.clone();

        Router::new()
            .merge(crate::routes::api_routes(state.clone()))
            .merge(crate::docs::routes(&config.docs))
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %crate::http::request::request_id(request.headers()),
                )
            }))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// The router, for serving or for in-process requests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            operation_budget_ms = self.config.timeouts.operation_budget_ms,
            docs = self.config.docs.enabled,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}
