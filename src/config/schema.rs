//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Environment variable holding the upstream base URL.
pub const UPSTREAM_ENV: &str = "FIGMA_MCP_SERVER_URL";

/// Environment variable overriding the listener bind address.
pub const BIND_ENV: &str = "MCP_RELAY_BIND";

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream origin the relay forwards to.
    pub upstream: UpstreamConfig,

    /// Forwarding behaviour (mount point, marker header, body limit).
    pub proxy: ProxyConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl RelayConfig {
    /// Overlay values taken from the environment.
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`; tests pass a map.
    /// Empty values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(UPSTREAM_ENV) {
            self.upstream.base_url = Some(url.trim().to_string());
        }
        if let Some(bind) = non_empty(BIND_ENV) {
            self.listener.bind_address = bind.trim().to_string();
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Absolute base URL of the upstream server.
    ///
    /// When unset every relayed request answers with a fixed 500.
    pub base_url: Option<String>,

    /// TCP connect timeout in seconds. `None` keeps the client default.
    pub connect_timeout_secs: Option<u64>,
}

/// Forwarding behaviour.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Catch-all mount point, e.g. "/api/mcp".
    pub mount_prefix: String,

    /// Value of the `x-proxied-by` marker header.
    pub proxied_by: String,

    /// Largest inbound request body buffered before forwarding.
    pub max_body_bytes: usize,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            mount_prefix: "/api/mcp".to_string(),
            proxied_by: "mcp-relay".to_string(),
            max_body_bytes: 16 * 1024 * 1024, // 16MB
        }
    }
}

impl ProxyConfig {
    /// Mount prefix without a trailing slash. The root mount is "".
    pub fn normalized_prefix(&self) -> &str {
        self.mount_prefix.trim_end_matches('/')
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: RelayConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.proxy.mount_prefix, "/api/mcp");
        assert_eq!(config.proxy.proxied_by, "mcp-relay");
        assert!(config.upstream.base_url.is_none());
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml() {
        let config: RelayConfig = toml::from_str(
            r#"
            [upstream]
            base_url = "http://127.0.0.1:3845/mcp"

            [proxy]
            proxied_by = "edge"
            "#,
        )
        .unwrap();
        assert_eq!(config.upstream.base_url.as_deref(), Some("http://127.0.0.1:3845/mcp"));
        assert_eq!(config.proxy.proxied_by, "edge");
        assert_eq!(config.proxy.mount_prefix, "/api/mcp");
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = RelayConfig::default();
        config.upstream.base_url = Some("http://file.example".into());
        config.apply_env(env(&[
            (UPSTREAM_ENV, "https://env.example/api"),
            (BIND_ENV, "127.0.0.1:9999"),
        ]));
        assert_eq!(config.upstream.base_url.as_deref(), Some("https://env.example/api"));
        assert_eq!(config.listener.bind_address, "127.0.0.1:9999");
    }

    #[test]
    fn test_empty_env_value_is_unset() {
        let mut config = RelayConfig::default();
        config.apply_env(env(&[(UPSTREAM_ENV, "  ")]));
        assert!(config.upstream.base_url.is_none());
    }

    #[test]
    fn test_normalized_prefix() {
        let mut proxy = ProxyConfig::default();
        assert_eq!(proxy.normalized_prefix(), "/api/mcp");
        proxy.mount_prefix = "/api/mcp/".into();
        assert_eq!(proxy.normalized_prefix(), "/api/mcp");
        proxy.mount_prefix = "/".into();
        assert_eq!(proxy.normalized_prefix(), "");
    }
}
