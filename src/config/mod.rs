//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)       environment variables
//!     → loader.rs (parse & deserialize)  → loader.rs (required upstream URLs/keys)
//!     → validation.rs (semantic checks, all errors collected)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All file-backed fields have defaults to allow running with no file
//! - Upstream credentials live only in the environment; a missing required
//!   variable fails the process at startup, before the listener binds

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::TimeoutConfig;
pub use schema::{UpstreamConfig, UpstreamsConfig};
