//! Request handling and transformation.
//!
//! # Responsibilities
//! - Extract the wildcard path segments after the mount prefix
//! - Resolve the upstream target URL (path + query)
//! - Prepare the outbound request (method, filtered headers, optional body)
//!
//! # Design Decisions
//! - Segments stay percent-encoded exactly as the client sent them
//! - The joined path is resolved as a path-relative reference ("./…"), so a
//!   segment such as `a:b` or an empty leading segment can never switch the
//!   target to another origin
//! - Query pairs are re-appended in order; repeated keys are all kept

use axum::body::Bytes;
use axum::http::{HeaderMap, Method};
use thiserror::Error;
use url::{form_urlencoded, Url};

use crate::security::headers::forwardable;

/// The target URL could not be resolved against the upstream base.
#[derive(Debug, Error)]
#[error("cannot resolve `{path}` against upstream base: {source}")]
pub struct TargetError {
    path: String,
    #[source]
    source: url::ParseError,
}

/// Path components after `mount_prefix`, still percent-encoded.
///
/// `mount_prefix` is expected without a trailing slash; the root mount is "".
/// A request for the prefix itself (with or without trailing slash) yields
/// no segments.
pub fn wildcard_segments(mount_prefix: &str, request_path: &str) -> Vec<String> {
    let rest = request_path.strip_prefix(mount_prefix).unwrap_or(request_path);
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    if rest.is_empty() {
        return Vec::new();
    }
    rest.split('/').map(str::to_string).collect()
}

/// Ensure the base path ends with exactly one slash.
pub fn normalize_base(base: &Url) -> Url {
    let mut base = base.clone();
    let trimmed = base.path().trim_end_matches('/').to_string();
    base.set_path(&format!("{}/", trimmed));
    base
}

/// Resolve the target URL for a relayed request.
pub fn build_target_url(
    base: &Url,
    segments: &[String],
    raw_query: Option<&str>,
) -> Result<Url, TargetError> {
    let base = normalize_base(base);

    let mut target = if segments.is_empty() {
        base
    } else {
        let path = segments.join("/");
        base.join(&format!("./{}", path))
            .map_err(|source| TargetError { path, source })?
    };

    let pairs: Vec<(String, String)> = raw_query
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();
    if !pairs.is_empty() {
        let mut query = target.query_pairs_mut();
        for (key, value) in &pairs {
            query.append_pair(key, value);
        }
    }

    Ok(target)
}

/// Whether `method` may carry a body upstream.
pub fn method_carries_body(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD)
}

/// Build the outbound request sent to the upstream.
///
/// GET and HEAD never carry a body; for other methods an empty buffer is
/// omitted rather than forwarded as a zero-length body.
pub fn build_upstream_request(
    method: Method,
    target: Url,
    inbound_headers: &HeaderMap,
    body: Option<Bytes>,
) -> reqwest::Request {
    let body = body.filter(|b| method_carries_body(&method) && !b.is_empty());

    let mut request = reqwest::Request::new(method, target);
    *request.headers_mut() = forwardable(inbound_headers);
    if let Some(bytes) = body {
        *request.body_mut() = Some(reqwest::Body::from(bytes));
    }
    request
}
