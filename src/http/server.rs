//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all relay routes
//! - Wire up middleware (tracing with a per-request id)
//! - Bind server to listener
//! - Serve until the shutdown signal fires

use std::sync::Arc;

use axum::{
    body::Body,
    http::Request,
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::RelayConfig;
use crate::http::relay::{relay_handler, Relay};
use crate::http::status::get_status;
use crate::lifecycle::ShutdownSignal;

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let relay = Arc::new(Relay::from_config(&config)?);

        match relay.upstream() {
            Some(upstream) => tracing::info!(upstream = %upstream, "Relay upstream configured"),
            None => tracing::warn!(
                "No upstream configured; every relayed request will answer 500"
            ),
        }

        let router = Self::build_router(&config, relay);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, relay: Arc<Relay>) -> Router {
        let prefix = config.proxy.normalized_prefix();

        let mut router = if prefix.is_empty() {
            Router::new()
                .route("/", any(relay_handler))
                .route("/{*path}", any(relay_handler))
        } else {
            Router::new()
                .route(prefix, any(relay_handler))
                .route(&format!("{}/", prefix), any(relay_handler))
                .route(&format!("{}/{{*path}}", prefix), any(relay_handler))
        };

        // The root mount owns every path, including /status.
        if !prefix.is_empty() && prefix != "/status" {
            router = router.route("/status", get(get_status));
        }

        router
            .with_state(relay)
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    request_id = %Uuid::new_v4(),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }))
    }

    /// Router with all layers, for in-process use (tests, embedding).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mount_prefix = %self.config.proxy.mount_prefix,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}
