//! Transparent HTTP forwarding relay.
//!
//! Requests under a catch-all mount prefix are forwarded to one configured
//! upstream origin with hop-by-hop headers stripped in both directions; the
//! upstream response is streamed back with an `x-proxied-by` marker.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::{Shutdown, ShutdownSignal};
