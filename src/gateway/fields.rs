//! Inbound field validation helpers.
//!
//! # Responsibilities
//! - Required-field checks producing the route's exact error message
//! - Wallet address normalization (lowercase before forwarding)
//! - Relative-endpoint validation for caller-supplied paths
//!
//! # Design Decisions
//! - Validation failures short-circuit before any outbound call
//! - Addresses keep their length; only shape (0x prefix, hex) is checked

use crate::gateway::error::GatewayError;

/// Require a non-blank field, trimming surrounding whitespace.
///
/// The error message is `"{label} is required"` so routes keep their
/// historical wording ("Pool address is required", "Address is required").
pub fn require_field(value: Option<&str>, label: &str) -> Result<String, GatewayError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| GatewayError::validation(format!("{label} is required")))
}

/// Require a wallet address field and normalize it to lowercase.
///
/// Accepts any `0x`-prefixed hex string; length is not enforced so that
/// upstream services remain the authority on address validity.
pub fn normalize_address(value: Option<&str>, label: &str) -> Result<String, GatewayError> {
    let raw = require_field(value, label)?;
    let lowered = raw.to_ascii_lowercase();

    let hex = lowered.strip_prefix("0x").unwrap_or("");
    if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(GatewayError::validation(format!("Invalid {}: {raw}", label.to_ascii_lowercase())));
    }

    Ok(lowered)
}

/// Require a resource identifier usable as a single path segment.
///
/// Axum percent-decodes path captures, so a crafted identifier could smuggle
/// separators into the outbound path. Identifiers never legitimately contain
/// them.
pub fn path_segment(value: &str, label: &str) -> Result<String, GatewayError> {
    let id = require_field(Some(value), label)?;
    if id.contains('/') || id.contains("..") || id.contains('?') || id.contains('#') {
        return Err(GatewayError::validation(format!("Invalid {}", label.to_ascii_lowercase())));
    }
    Ok(id)
}

/// Validate a caller-supplied endpoint as a relative path.
///
/// The value is joined to a configured upstream base, so it must not be able
/// to redirect the call elsewhere: it has to start with a single `/`, carry
/// no scheme, and contain no `..` segments.
pub fn relative_endpoint(value: Option<&str>, label: &str) -> Result<String, GatewayError> {
    let path = require_field(value, label)?;

    if !path.starts_with('/') || path.starts_with("//") {
        return Err(GatewayError::validation(format!(
            "{label} must be a relative path starting with '/'"
        )));
    }
    if path.contains("://") {
        return Err(GatewayError::validation(format!(
            "{label} must not contain a scheme"
        )));
    }
    if path.split(['/', '?', '#']).any(|segment| segment == "..") {
        return Err(GatewayError::validation(format!(
            "{label} must not contain '..' segments"
        )));
    }

    Ok(path)
}
