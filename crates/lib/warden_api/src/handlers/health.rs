//! Liveness endpoint.

use axum::Json;

use crate::models::HealthResponse;

/// `GET /health` — reports the service is up and its version.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: warden_core::version().to_string(),
    })
}
