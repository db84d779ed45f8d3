//! The forwarding handler.
//!
//! One linear pass per request: resolve target, filter headers, buffer the
//! body (non-GET/HEAD only), send once, relay the response as a stream.
//! Requests are never retried.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Request};
use axum::response::{IntoResponse, Response};
use url::Url;

use crate::config::RelayConfig;
use crate::http::error::RelayError;
use crate::http::request::{
    build_target_url, build_upstream_request, method_carries_body, wildcard_segments,
};
use crate::http::response::relay_response;
use crate::observability::metrics;
use crate::security::limits::read_limited;

/// Stateless forwarding policy plus the shared upstream client.
#[derive(Debug, Clone)]
pub struct Relay {
    upstream: Option<Url>,
    mount_prefix: String,
    proxied_by: HeaderValue,
    max_body_bytes: usize,
    client: reqwest::Client,
}

impl Relay {
    /// Build the relay from a validated configuration.
    ///
    /// An unparsable upstream URL is treated like a missing one, so the
    /// relay still starts and answers with the configuration error.
    pub fn from_config(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        let upstream = config
            .upstream
            .base_url
            .as_deref()
            .and_then(|raw| Url::parse(raw).ok());

        let proxied_by = HeaderValue::from_str(&config.proxy.proxied_by)
            .unwrap_or_else(|_| HeaderValue::from_static("mcp-relay"));

        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .no_proxy();
        if let Some(secs) = config.upstream.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            upstream,
            mount_prefix: config.proxy.normalized_prefix().to_string(),
            proxied_by,
            max_body_bytes: config.proxy.max_body_bytes,
            client: builder.build()?,
        })
    }

    /// Upstream base, if configured.
    pub fn upstream(&self) -> Option<&Url> {
        self.upstream.as_ref()
    }

    /// Relay one request to the upstream.
    pub async fn handle(&self, request: Request<Body>) -> Result<Response, RelayError> {
        let upstream = self.upstream.as_ref().ok_or(RelayError::NotConfigured)?;

        let (parts, body) = request.into_parts();
        let segments = wildcard_segments(&self.mount_prefix, parts.uri.path());
        let target = build_target_url(upstream, &segments, parts.uri.query())?;

        let body = if method_carries_body(&parts.method) {
            Some(read_limited(&parts.headers, body, self.max_body_bytes).await?)
        } else {
            None
        };

        tracing::debug!(
            method = %parts.method,
            target = %target,
            body_bytes = body.as_ref().map(|b| b.len()).unwrap_or(0),
            "Forwarding upstream"
        );

        let outbound = build_upstream_request(parts.method, target, &parts.headers, body);
        let upstream_response = self
            .client
            .execute(outbound)
            .await
            .map_err(RelayError::Upstream)?;

        Ok(relay_response(upstream_response, &self.proxied_by))
    }
}

/// Axum entry point for the catch-all routes.
pub async fn relay_handler(State(relay): State<Arc<Relay>>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = match relay.handle(request).await {
        Ok(response) => response,
        Err(err) => {
            match &err {
                RelayError::NotConfigured => {
                    tracing::warn!(path = %path, "Upstream not configured")
                }
                RelayError::Upstream(e) => {
                    tracing::error!(path = %path, error = %e, "Upstream error")
                }
                other => tracing::info!(path = %path, error = %other, "Rejected request"),
            }
            err.into_response()
        }
    };

    metrics::record_request(&method, response.status().as_u16(), start_time);
    response
}
