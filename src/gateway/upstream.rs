//! Upstream target abstraction.
//!
//! # Responsibilities
//! - Represent a single configured upstream service
//! - Pre-normalize the base URL for path joining
//! - Carry the `x-api-key` credential attached to every outbound request

use crate::config::UpstreamConfig;

/// Credential header attached to every outbound request.
pub const X_API_KEY: &str = "x-api-key";

/// A configured upstream service.
///
/// Immutable once constructed; resolved from environment configuration at
/// process start and shared via `Arc` in the application state.
#[derive(Debug, Clone)]
pub struct Upstream {
    /// Short name used in logs and metric labels.
    name: &'static str,
    /// Base URL with any trailing slash stripped.
    base: String,
    /// API key for the credential header.
    api_key: String,
}

impl Upstream {
    /// Create an upstream from validated configuration.
    pub fn new(name: &'static str, config: &UpstreamConfig) -> Self {
        Self {
            name,
            base: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Short name for logs and metric labels.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Full URL for an upstream path. `path` must start with '/'.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// The API key sent as `x-api-key`.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}
