//! Errors produced by the relay itself.
//!
//! Upstream HTTP statuses are never errors here; they are relayed as-is.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::config::schema::UPSTREAM_ENV;
use crate::http::request::TargetError;
use crate::security::limits::BodyLimitError;

#[derive(Debug, Error)]
pub enum RelayError {
    /// No upstream base URL configured; no network I/O is attempted.
    #[error(
        "{} is not configured. Set it in the environment (e.g. .env.local) \
         or as upstream.base_url in the config file.",
        UPSTREAM_ENV
    )]
    NotConfigured,

    #[error(transparent)]
    Body(#[from] BodyLimitError),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error("upstream request failed")]
    Upstream(#[source] reqwest::Error),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Body(BodyLimitError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::Body(BodyLimitError::Read(_)) => StatusCode::BAD_REQUEST,
            RelayError::Target(_) => StatusCode::BAD_REQUEST,
            RelayError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
