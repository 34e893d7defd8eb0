//! Quickstart HTTP API.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌───────────────────────────────────────────────────┐
//!                     │                     HELLO API                      │
//!                     │                                                    │
//!   Client Request    │  ┌──────────┐   ┌────────────┐   ┌─────────────┐   │
//!   ──────────────────┼─▶│  http    │──▶│ middleware │──▶│   routes    │   │
//!                     │  │  server  │   │ auth/metric│   │  handlers   │   │
//!                     │  └──────────┘   └────────────┘   └──────┬──────┘   │
//!                     │                                         │          │
//!                     │                                         ▼          │
//!                     │                                  ┌─────────────┐   │
//!                     │                                  │ resilience  │   │
//!                     │                                  │  bounded    │───┼──▶ slow task /
//!                     │                                  │  runner     │   │    completion API
//!                     │                                  └─────────────┘   │
//!                     │                                                    │
//!                     │  config · observability · docs · lifecycle         │
//!                     └───────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use hello_api::config::loader::{default_config, load_config};
use hello_api::lifecycle::Shutdown;
use hello_api::observability::{logging, metrics};
use hello_api::ApiServer;

#[derive(Parser)]
#[command(name = "hello-api")]
#[command(about = "Quickstart HTTP API with bounded long-running operations", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long, env = "HELLO_API_CONFIG")]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => default_config()?,
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind.to_string();
    }

    logging::init_logging(&config.observability)?;

    tracing::info!("hello-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_path = ?args.config,
        bind_address = %config.listener.bind_address,
        operation_budget_ms = config.timeouts.operation_budget_ms,
        request_timeout_secs = config.timeouts.request_secs,
        completion_configured = config.completion.api_key.is_some(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = ApiServer::new(config)?;
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    shutdown.trigger_on_signal().await?;

    server_task.await??;
    tracing::info!("Shutdown complete");
    Ok(())
}
