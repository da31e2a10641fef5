//! Integration gateway for the agent launchpad platform.
//!
//! A thin API gateway built with Tokio and Axum: every inbound route
//! validates a small set of required fields, forwards exactly one request
//! to a configured upstream service with an API-key credential attached,
//! and relays the response or a normalized JSON error envelope.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │               AGENT GATEWAY                  │
//!                    │                                              │
//!   Client Request   │  ┌────────┐   ┌─────────┐   ┌────────────┐  │
//!   ─────────────────┼─▶│  http  │──▶│ routes  │──▶│  gateway   │──┼──▶ agent-api
//!                    │  │ server │   │validate │   │ forwarder  │  │
//!                    │  └────────┘   └─────────┘   └─────┬──────┘  │
//!                    │                                   │         │
//!   Client Response  │        error envelope / passthrough         │
//!   ◀────────────────┼───────────────────────────────────┴─────────┼──▶ mirror-api
//!                    │                                              │
//!                    │  ┌────────────────────────────────────────┐  │
//!                    │  │         Cross-Cutting Concerns          │  │
//!                    │  │  config │ observability │ lifecycle     │  │
//!                    │  └────────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use agent_gateway::config::load_config;
use agent_gateway::http::HttpServer;
use agent_gateway::lifecycle::{signals, Shutdown};
use agent_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "agent-gateway")]
#[command(about = "Integration gateway for the agent launchpad platform", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Fail fast: a missing upstream variable or invalid config aborts here,
    // before anything binds.
    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability.log_level);

    tracing::info!("agent-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        agent_api = %config.upstreams.agent.url,
        mirror_api = %config.upstreams.mirror.url,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        tracing::info!("Shutdown signal received");
        shutdown.trigger();
    });

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
