//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all gateway routes
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Construct the shared application state (config, upstreams, forwarder)
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::gateway::{Gateway, Upstream};
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::routes;

/// Application state injected into handlers.
///
/// Everything here is immutable after startup; handlers hold no shared
/// mutable state and are freely reentrant.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub gateway: Gateway,
    pub agent_api: Arc<Upstream>,
    pub mirror_api: Arc<Upstream>,
}

impl AppState {
    /// Build the state from validated configuration.
    pub fn new(config: Arc<GatewayConfig>) -> Self {
        Self {
            gateway: Gateway::new(&config.timeouts),
            agent_api: Arc::new(Upstream::new("agent-api", &config.upstreams.agent)),
            mirror_api: Arc::new(Upstream::new("mirror-api", &config.upstreams.mirror)),
            config,
        }
    }
}

/// HTTP server for the integration gateway.
pub struct HttpServer {
    router: Router,
    config: Arc<GatewayConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let config = Arc::new(config);
        let state = AppState::new(config.clone());
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layer order (outermost first): request-id assignment, tracing,
    /// request-id propagation, body limit, timeout, routes.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        routes::router()
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_size))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
