//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader::parse_config (parse & deserialize, no checks)
//!     → RelayConfig::apply_env (FIGMA_MCP_SERVER_URL, MCP_RELAY_BIND)
//!     → ConfigOverrides (command line)
//!     → validation.rs (semantic checks, once, on the merged result)
//!     → RelayConfig (validated, immutable)
//!     → injected into the relay handler at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, resolve_config, ConfigError, ConfigOverrides};
pub use schema::{ListenerConfig, ObservabilityConfig, ProxyConfig, RelayConfig, UpstreamConfig};
pub use validation::{validate_config, ValidationError};
