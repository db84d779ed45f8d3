//! Response handling and transformation.
//!
//! # Responsibilities
//! - Transform the upstream response for the client
//! - Strip hop-by-hop headers and add `x-proxied-by`
//! - Stream the body through without buffering
//!
//! # Design Decisions
//! - Status codes are relayed untouched, redirects and errors included
//! - The body is a lazy, single-pass stream: SSE and large downloads are
//!   never materialized in memory
//! - The upstream connection is owned by the stream and released when the
//!   client response is dropped

use axum::body::Body;
use axum::http::HeaderValue;
use axum::response::Response;

use crate::security::headers::mark_relayed;

/// Convert an upstream response into the response returned to the caller.
pub fn relay_response(upstream: reqwest::Response, proxied_by: &HeaderValue) -> Response {
    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    mark_relayed(&mut headers, proxied_by);

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
