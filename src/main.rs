//! mcp-relay
//!
//! A transparent forwarding relay built with Tokio, Axum and reqwest.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                   RELAY                       │
//!   Client Request       │  ┌──────────┐   ┌──────────┐   ┌───────────┐ │
//!   ─────────────────────┼─▶│  server  │──▶│  relay   │──▶│  request  │─┼──▶ Upstream
//!   PREFIX/{...path}     │  │ (axum)   │   │ handler  │   │ transform │ │
//!                        │  └──────────┘   └──────────┘   └───────────┘ │
//!                        │                                               │
//!   Client Response      │                 ┌──────────┐                  │
//!   ◀────────────────────┼─────────────────│ response │◀─────────────────┼─── Upstream
//!   (streamed)           │                 │ transform│                  │
//!                        │                 └──────────┘                  │
//!                        │  config · security · observability · lifecycle│
//!                        └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use mcp_relay::config::{resolve_config, ConfigOverrides};
use mcp_relay::lifecycle::{signals, Shutdown};
use mcp_relay::observability::{logging, metrics};
use mcp_relay::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "mcp-relay")]
#[command(about = "Transparent HTTP relay to a configured upstream server", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "MCP_RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Listener address, overrides config and environment.
    #[arg(short, long)]
    bind: Option<String>,

    /// Upstream base URL, overrides config and environment.
    #[arg(short, long)]
    upstream: Option<String>,

    /// Log level used when RUST_LOG is unset.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bind: self.bind.clone(),
            upstream: self.upstream.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let resolved = resolve_config(
        cli.config.as_deref(),
        |key| std::env::var(key).ok(),
        &cli.overrides(),
    );
    let config = match resolved {
        Ok(config) => config,
        Err(e) => {
            logging::init_logging("info");
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    logging::init_logging(&config.observability.log_level);

    tracing::info!("mcp-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        mount_prefix = %config.proxy.mount_prefix,
        max_body_bytes = config.proxy.max_body_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        if let Err(e) = metrics::init_metrics(addr) {
            tracing::error!(error = %e, "Failed to start metrics endpoint");
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
