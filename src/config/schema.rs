//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! File-backed sections derive Serde traits for deserialization from TOML;
//! upstream credentials are resolved from the environment by the loader and
//! never appear in config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the integration gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request body limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Upstream services. Resolved from the environment, not the file.
    #[serde(skip)]
    pub upstreams: UpstreamsConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration for inbound and outbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout for outbound calls, in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    /// Applies to inbound handling and to each outbound call.
    pub request_secs: u64,

    /// Idle timeout for pooled outbound connections, in seconds.
    pub idle_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 60,
            idle_secs: 90,
        }
    }
}

/// Request body limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum inbound body size in bytes. Covers JSON and multipart
    /// payloads; agent images are the largest expected bodies.
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 8 * 1024 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). Overridden by RUST_LOG.
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// A single upstream service: base URL plus credential.
#[derive(Debug, Clone, Default)]
pub struct UpstreamConfig {
    /// Base URL (e.g., "https://agents.internal.example").
    pub url: String,

    /// API key sent as the `x-api-key` header on every outbound request.
    pub api_key: String,
}

/// Upstream services the gateway forwards to.
///
/// Populated from environment variables at startup; the agent runtime and
/// the mirror service are required, the Telegram webhook secret is optional.
#[derive(Debug, Clone, Default)]
pub struct UpstreamsConfig {
    /// Agent runtime service (`AGENT_API_URL` / `AGENT_API_KEY`).
    pub agent: UpstreamConfig,

    /// Mirror service brokering social-platform connections
    /// (`MIRROR_API_URL` / `MIRROR_API_KEY`).
    pub mirror: UpstreamConfig,

    /// Shared secret expected in `x-telegram-bot-api-secret-token` on
    /// inbound webhook calls (`TELEGRAM_WEBHOOK_SECRET`). Unset disables
    /// the check.
    pub telegram_webhook_secret: Option<String>,
}
