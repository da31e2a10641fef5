//! Structured logging.
//!
//! # Responsibilities
//! - Install the global tracing subscriber
//! - Honor RUST_LOG when set, fall back to the configured level
//!
//! # Design Decisions
//! - One subscriber for the process lifetime; installed before serving
//! - Request IDs flow through tower-http trace spans, not manual fields

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the tracing subscriber.
///
/// `default_level` comes from the configuration file and applies to the
/// gateway and tower-http targets when RUST_LOG is unset.
pub fn init(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("agent_gateway={default_level},tower_http={default_level}").into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
