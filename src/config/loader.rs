//! Configuration loading from disk and environment.
//!
//! File config is optional; every field has a default. Upstream base URLs
//! and API keys come from the environment only and are required at startup:
//! a missing variable aborts the load before the server binds anything.

use std::env;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{GatewayConfig, UpstreamConfig, UpstreamsConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variables consumed by the loader.
pub const ENV_AGENT_API_URL: &str = "AGENT_API_URL";
pub const ENV_AGENT_API_KEY: &str = "AGENT_API_KEY";
pub const ENV_MIRROR_API_URL: &str = "MIRROR_API_URL";
pub const ENV_MIRROR_API_KEY: &str = "MIRROR_API_KEY";
pub const ENV_TELEGRAM_WEBHOOK_SECRET: &str = "TELEGRAM_WEBHOOK_SECRET";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration.
///
/// `path` points at an optional TOML file for the listener/timeout/limit
/// sections; upstream credentials are always read from the environment.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p)?;
            toml::from_str::<GatewayConfig>(&content)?
        }
        None => GatewayConfig::default(),
    };

    config.upstreams = upstreams_from_env()?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn upstreams_from_env() -> Result<UpstreamsConfig, ConfigError> {
    Ok(UpstreamsConfig {
        agent: UpstreamConfig {
            url: require_env(ENV_AGENT_API_URL)?,
            api_key: require_env(ENV_AGENT_API_KEY)?,
        },
        mirror: UpstreamConfig {
            url: require_env(ENV_MIRROR_API_URL)?,
            api_key: require_env(ENV_MIRROR_API_KEY)?,
        },
        telegram_webhook_secret: env::var(ENV_TELEGRAM_WEBHOOK_SECRET)
            .ok()
            .filter(|v| !v.is_empty()),
    })
}

fn require_env(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingEnv(name)),
    }
}
