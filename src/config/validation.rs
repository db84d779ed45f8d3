//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, the upstream URL and the marker header value
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - A missing upstream URL is valid: the relay then answers every request
//!   with a configuration error instead of refusing to start

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a host:port address")]
    BindAddress(String),

    #[error("upstream.base_url `{0}` is not an absolute http(s) URL")]
    UpstreamUrl(String),

    #[error("proxy.mount_prefix `{0}` must start with '/' and contain no route parameters")]
    MountPrefix(String),

    #[error("proxy.proxied_by `{0}` is not a valid header value")]
    ProxiedBy(String),

    #[error("proxy.max_body_bytes must be greater than zero")]
    BodyLimit,

    #[error("observability.metrics_address `{0}` must be an IP:port socket address")]
    MetricsAddress(String),
}

/// `IP:port`, `[IPv6]:port` or `hostname:port`, as `TcpListener::bind` accepts.
fn is_bind_address(addr: &str) -> bool {
    if addr.parse::<SocketAddr>().is_ok() {
        return true;
    }
    match addr.rsplit_once(':') {
        Some((host, port)) => {
            !host.is_empty()
                && !host.contains(':')
                && !host.contains(char::is_whitespace)
                && port.parse::<u16>().is_ok()
        }
        None => false,
    }
}

/// Route syntax would be read as axum path parameters, and axum rejects
/// `:name` segments outright.
fn is_mount_prefix(prefix: &str) -> bool {
    prefix.starts_with('/')
        && !prefix.contains(['{', '}', '*'])
        && !prefix.split('/').any(|segment| segment.starts_with(':'))
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_bind_address(&config.listener.bind_address) {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if let Some(raw) = &config.upstream.base_url {
        let valid = Url::parse(raw)
            .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
            .unwrap_or(false);
        if !valid {
            errors.push(ValidationError::UpstreamUrl(raw.clone()));
        }
    }

    if !is_mount_prefix(&config.proxy.mount_prefix) {
        errors.push(ValidationError::MountPrefix(config.proxy.mount_prefix.clone()));
    }

    let marker = &config.proxy.proxied_by;
    if marker.is_empty() || HeaderValue::from_str(marker).is_err() {
        errors.push(ValidationError::ProxiedBy(marker.clone()));
    }

    if config.proxy.max_body_bytes == 0 {
        errors.push(ValidationError::BodyLimit);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
