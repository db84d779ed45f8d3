//! Request body limits.
//!
//! # Responsibilities
//! - Buffer inbound request bodies up to a configured ceiling
//! - Distinguish "too large" from "unreadable" so callers can answer 413 or 400
//!
//! # Design Decisions
//! - `Content-Length` is checked first so oversized uploads fail before
//!   any bytes are read
//! - Bodies without a length are enforced while streaming via `Limited`

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap};
use http_body_util::LengthLimitError;
use thiserror::Error;

/// Failure while buffering an inbound body.
#[derive(Debug, Error)]
pub enum BodyLimitError {
    #[error("request body exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("failed to read request body: {0}")]
    Read(axum::Error),
}

/// Read `body` fully into memory, refusing anything larger than `limit`.
pub async fn read_limited(
    headers: &HeaderMap,
    body: Body,
    limit: usize,
) -> Result<Bytes, BodyLimitError> {
    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    if let Some(len) = declared {
        if len > limit as u64 {
            return Err(BodyLimitError::TooLarge { limit });
        }
    }

    axum::body::to_bytes(body, limit).await.map_err(|e| {
        if is_length_limit(&e) {
            BodyLimitError::TooLarge { limit }
        } else {
            BodyLimitError::Read(e)
        }
    })
}

fn is_length_limit(err: &axum::Error) -> bool {
    std::error::Error::source(err).is_some_and(|e| e.is::<LengthLimitError>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn test_reads_body_within_limit() {
        let bytes = read_limited(&HeaderMap::new(), Body::from("hello"), 16)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"hello");
    }

    #[tokio::test]
    async fn test_empty_body() {
        let bytes = read_limited(&HeaderMap::new(), Body::empty(), 16).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_declared_length_over_limit() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("1024"));
        let err = read_limited(&headers, Body::from("tiny"), 16).await.unwrap_err();
        assert!(matches!(err, BodyLimitError::TooLarge { limit: 16 }));
    }

    #[tokio::test]
    async fn test_streamed_body_over_limit() {
        let err = read_limited(&HeaderMap::new(), Body::from(vec![0u8; 64]), 16)
            .await
            .unwrap_err();
        assert!(matches!(err, BodyLimitError::TooLarge { .. }));
    }
}
