//! Liveness probe.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process serves requests.
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Crate version.
    pub version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "tally",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /health`. Does not touch storage.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
