//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all routes under the mount prefix)
//!     → relay.rs (configuration check, one pass per request)
//!     → request.rs (wildcard segments, target URL, outbound request)
//!     → upstream (reqwest, redirects never followed)
//!     → response.rs (filter headers, mark, stream body)
//!     → Send to client
//! ```

pub mod error;
pub mod relay;
pub mod request;
pub mod response;
pub mod server;
pub mod status;

pub use error::RelayError;
pub use relay::Relay;
pub use server::HttpServer;
