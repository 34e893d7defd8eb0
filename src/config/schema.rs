//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the API.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the API server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ApiConfig {
    /// Listener configuration (bind address, body limits).
    pub listener: ListenerConfig,

    /// Timeout configuration, including the bounded operation budget.
    pub timeouts: TimeoutConfig,

    /// Bearer token protecting `/api/*`.
    pub auth: AuthConfig,

    /// Chat completion provider settings.
    pub completion: CompletionConfig,

    /// OpenAPI document and docs page.
    pub docs: DocsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8787").
    pub bind_address: String,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8787".to_string(),
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Wall-clock budget for bounded operations in milliseconds.
    pub operation_budget_ms: u64,

    /// HTTP status reported when a bounded operation times out.
    pub timeout_status: u16,

    /// Message reported when a bounded operation times out.
    pub timeout_message: String,

    /// Whole-request timeout enforced by the HTTP layer, in seconds.
    pub request_secs: u64,

    /// How long the `/long-running-operation` dummy task sleeps.
    pub demo_delay_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            operation_budget_ms: 10_000,
            timeout_status: 500,
            timeout_message: "timed out!".to_string(),
            request_secs: 30,
            demo_delay_ms: 11_000,
        }
    }
}

/// Bearer token authentication.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Token expected in `Authorization: Bearer <token>`.
    pub token: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            // WARNING: This is a placeholder! Change this in production.
            token: "CHANGE_ME_IN_PRODUCTION".to_string(),
        }
    }
}

/// Chat completion provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Base URL of an OpenAI-compatible API.
    pub base_url: String,

    /// Provider API key. Usually supplied through `OPENAI_API_KEY`.
    pub api_key: Option<String>,

    /// Model used when a request does not name one.
    pub default_model: String,

    /// Transport-level timeout for the outbound call in seconds.
    pub request_timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            default_model: "gpt-3.5-turbo".to_string(),
            request_timeout_secs: 60,
        }
    }
}

/// OpenAPI document and interactive docs page.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Serve the document and the docs page.
    pub enabled: bool,

    /// `info.title` of the document.
    pub title: String,

    /// `info.version` of the document.
    pub version: String,

    /// Path serving the OpenAPI JSON.
    pub spec_path: String,

    /// Path serving the Swagger UI page.
    pub ui_path: String,

    /// Servers advertised in the document.
    pub servers: Vec<ServerEntry>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "An API".to_string(),
            version: "v1".to_string(),
            spec_path: "/doc".to_string(),
            ui_path: "/ui".to_string(),
            servers: vec![ServerEntry {
                url: "http://localhost:8787".to_string(),
                description: Some("Development server".to_string()),
            }],
        }
    }
}

/// A server entry in the OpenAPI document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerEntry {
    pub url: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format: "pretty" or "json".
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.timeouts.operation_budget_ms, 10_000);
        assert_eq!(config.timeouts.timeout_status, 500);
        assert_eq!(config.timeouts.timeout_message, "timed out!");
        assert!(config.timeouts.demo_delay_ms > config.timeouts.operation_budget_ms);
        assert!(config.completion.api_key.is_none());
        assert_eq!(config.docs.spec_path, "/doc");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ApiConfig = toml::from_str(
            r#"
            [timeouts]
            operation_budget_ms = 250

            [docs]
            title = "Quickstart"
            "#,
        )
        .unwrap();

        assert_eq!(config.timeouts.operation_budget_ms, 250);
        assert_eq!(config.timeouts.timeout_message, "timed out!");
        assert_eq!(config.docs.title, "Quickstart");
        assert_eq!(config.docs.version, "v1");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8787");
    }
}
