//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, status codes, addresses)
//! - Check the bounded operation budget fits inside the request timeout
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ApiConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::StatusCode;
use thiserror::Error;

use crate::config::schema::ApiConfig;

/// Paths served by the API routes themselves.
const API_PATHS: &[&str] = &["/hello", "/image", "/long-running-operation"];

/// Prefixes owned by the API routes.
const API_PREFIXES: &[&str] = &["/hello/", "/api/"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: invalid URL '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("timeouts.timeout_status: {0} is not an error status (400-599)")]
    InvalidTimeoutStatus(u16),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("timeouts.request_secs ({request_secs}s) must exceed timeouts.operation_budget_ms ({budget_ms}ms)")]
    BudgetExceedsRequestTimeout { budget_ms: u64, request_secs: u64 },

    #[error("{field}: path '{value}' must start with '/'")]
    InvalidPath { field: &'static str, value: String },

    #[error("docs.spec_path and docs.ui_path must differ")]
    DocsPathConflict,

    #[error("{field}: path '{value}' collides with an API route")]
    DocsPathCollision { field: &'static str, value: String },

    #[error("observability.log_format: expected 'pretty' or 'json', got '{0}'")]
    InvalidLogFormat(String),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ApiConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.listener.max_body_size == 0 {
        errors.push(ValidationError::Zero("listener.max_body_size"));
    }

    let timeouts = &config.timeouts;
    let status_ok = StatusCode::from_u16(timeouts.timeout_status)
        .map(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(false);
    if !status_ok {
        errors.push(ValidationError::InvalidTimeoutStatus(timeouts.timeout_status));
    }
    if timeouts.timeout_message.trim().is_empty() {
        errors.push(ValidationError::Empty("timeouts.timeout_message"));
    }
    if timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    } else if timeouts.request_secs.saturating_mul(1000) <= timeouts.operation_budget_ms {
        errors.push(ValidationError::BudgetExceedsRequestTimeout {
            budget_ms: timeouts.operation_budget_ms,
            request_secs: timeouts.request_secs,
        });
    }

    if config.auth.token.is_empty() {
        errors.push(ValidationError::Empty("auth.token"));
    }

    check_url(&mut errors, "completion.base_url", &config.completion.base_url);
    if config.completion.default_model.trim().is_empty() {
        errors.push(ValidationError::Empty("completion.default_model"));
    }
    if config.completion.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("completion.request_timeout_secs"));
    }

    let docs = &config.docs;
    check_path(&mut errors, "docs.spec_path", &docs.spec_path);
    check_path(&mut errors, "docs.ui_path", &docs.ui_path);
    if docs.enabled {
        check_docs_path(&mut errors, "docs.spec_path", &docs.spec_path);
        check_docs_path(&mut errors, "docs.ui_path", &docs.ui_path);
    }
    if docs.spec_path == docs.ui_path {
        errors.push(ValidationError::DocsPathConflict);
    }
    for server in &docs.servers {
        check_url(&mut errors, "docs.servers.url", &server.url);
    }

    let observability = &config.observability;
    if !matches!(observability.log_format.as_str(), "pretty" | "json") {
        errors.push(ValidationError::InvalidLogFormat(observability.log_format.clone()));
    }
    if observability.metrics_enabled {
        check_address(&mut errors, "observability.metrics_address", &observability.metrics_address);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if url::Url::parse(value).is_err() {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
}

fn check_path(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if !value.starts_with('/') {
        errors.push(ValidationError::InvalidPath {
            field,
            value: value.to_string(),
        });
    }
}

fn check_docs_path(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    let collides = API_PATHS.contains(&value) || API_PREFIXES.iter().any(|prefix| value.starts_with(prefix));
    if collides {
        errors.push(ValidationError::DocsPathCollision {
            field,
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ApiConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ApiConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.timeout_status = 200;
        config.timeouts.timeout_message = "  ".into();
        config.completion.base_url = "api.openai.com".into();
        config.observability.log_format = "xml".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::InvalidTimeoutStatus(200)));
        assert!(errors.contains(&ValidationError::Empty("timeouts.timeout_message")));
        assert!(errors.contains(&ValidationError::InvalidLogFormat("xml".into())));
    }

    #[test]
    fn test_budget_must_fit_request_timeout() {
        let mut config = ApiConfig::default();
        config.timeouts.operation_budget_ms = 30_000;
        config.timeouts.request_secs = 30;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::BudgetExceedsRequestTimeout {
                budget_ms: 30_000,
                request_secs: 30,
            }]
        );
    }

    #[test]
    fn test_zero_budget_is_allowed() {
        let mut config = ApiConfig::default();
        config.timeouts.operation_budget_ms = 0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_docs_paths() {
        let mut config = ApiConfig::default();
        config.docs.ui_path = "/doc".into();
        config.docs.spec_path = "doc".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ValidationError::InvalidPath { field: "docs.spec_path", .. }
        ));

        config.docs.spec_path = "/doc".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::DocsPathConflict]);
    }

    #[test]
    fn test_docs_paths_must_not_shadow_api_routes() {
        for path in ["/hello", "/image", "/long-running-operation", "/hello/{name}", "/api/docs"] {
            let mut config = ApiConfig::default();
            config.docs.ui_path = path.into();

            let errors = validate_config(&config).unwrap_err();
            assert_eq!(
                errors,
                vec![ValidationError::DocsPathCollision {
                    field: "docs.ui_path",
                    value: path.to_string(),
                }],
                "{path}"
            );
        }

        let mut config = ApiConfig::default();
        config.docs.spec_path = "/api/openapi.json".into();
        assert!(matches!(
            validate_config(&config).unwrap_err()[0],
            ValidationError::DocsPathCollision { field: "docs.spec_path", .. }
        ));
    }

    #[test]
    fn test_docs_paths_unchecked_when_disabled() {
        let mut config = ApiConfig::default();
        config.docs.enabled = false;
        config.docs.ui_path = "/hello".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_api_like_docs_paths_are_allowed() {
        let mut config = ApiConfig::default();
        config.docs.ui_path = "/hello-docs".into();
        config.docs.spec_path = "/api".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::InvalidTimeoutStatus(200);
        assert_eq!(
            err.to_string(),
            "timeouts.timeout_status: 200 is not an error status (400-599)"
        );
    }
}
