//! Header manipulation for the relay hop.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers in both directions
//! - Mark relayed responses with `x-proxied-by`
//!
//! # Design Decisions
//! - The same exclusion set applies to requests and responses
//! - `content-length` and `host` are excluded too: the outbound transport
//!   re-frames the message and derives both from the new connection
//! - Matching is case-insensitive because `HeaderName` is always lowercase

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};

/// Marker header added to every relayed response.
pub const X_PROXIED_BY: HeaderName = HeaderName::from_static("x-proxied-by");

/// Headers never forwarded across the relay, in either direction.
pub const HOP_BY_HOP_HEADERS: [HeaderName; 10] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    HeaderName::from_static("trailers"),
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::CONTENT_LENGTH,
    header::HOST,
];

/// Returns true if `name` belongs to the exclusion set.
pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP_HEADERS.iter().any(|h| h == name)
}

/// Remove every value of every excluded header.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP_HEADERS.iter() {
        // `remove` drops all values stored under the name.
        headers.remove(name);
    }
}

/// Copy `source` minus the exclusion set, keeping multi-valued entries in order.
pub fn forwardable(source: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(source.len());
    for (name, value) in source.iter() {
        if !is_hop_by_hop(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

/// Strip the exclusion set from a response header map and add the marker.
pub fn mark_relayed(headers: &mut HeaderMap, proxied_by: &HeaderValue) {
    strip_hop_by_hop(headers);
    headers.insert(X_PROXIED_BY, proxied_by.clone());
}
