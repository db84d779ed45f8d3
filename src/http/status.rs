use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::http::relay::Relay;

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub upstream: Option<String>,
}

pub async fn get_status(State(relay): State<Arc<Relay>>) -> Json<SystemStatus> {
    let upstream = relay.upstream().map(|u| u.to_string());
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: if upstream.is_some() { "operational" } else { "unconfigured" },
        upstream,
    })
}
