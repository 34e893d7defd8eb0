//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ApiConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `completion.api_key`.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable overriding `auth.token`.
pub const API_TOKEN_ENV: &str = "API_TOKEN";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ApiConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, |key| std::env::var(key).ok())
}

/// Build the configuration used when no file is given: defaults plus environment.
pub fn default_config() -> Result<ApiConfig, ConfigError> {
    parse_config("", |key| std::env::var(key).ok())
}

/// Parse TOML, apply environment overrides, validate.
///
/// `env` is injected so overrides can be exercised without touching the
/// process environment.
pub fn parse_config<E>(content: &str, env: E) -> Result<ApiConfig, ConfigError>
where
    E: Fn(&str) -> Option<String>,
{
    let mut config: ApiConfig = toml::from_str(content)?;

    if let Some(key) = env(OPENAI_API_KEY_ENV).filter(|k| !k.is_empty()) {
        config.completion.api_key = Some(key);
    }
    if let Some(token) = env(API_TOKEN_ENV).filter(|t| !t.is_empty()) {
        config.auth.token = token;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
