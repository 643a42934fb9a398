//! Liveness endpoints.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::GatewayState;

/// Greeting returned by `GET /`.
pub const GREETING: &str = "Hello from the backend!";

/// Handler for `GET /`
pub async fn root() -> &'static str {
    GREETING
}

#[derive(Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: String,
    pub max_attempts: u32,
}

/// Handler for `GET /health`
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.identifier.provider_name().to_string(),
        max_attempts: state.identifier.max_attempts(),
    })
}
