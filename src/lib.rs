//! Integration gateway library for the agent launchpad platform.

pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routes;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
