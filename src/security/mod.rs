//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → limits.rs (buffer body up to the configured ceiling)
//!     → headers.rs (strip hop-by-hop headers)
//!     → Forward upstream
//!
//! Upstream response:
//!     → headers.rs (strip hop-by-hop headers, add x-proxied-by)
//!     → Stream to client
//! ```

pub mod headers;
pub mod limits;
