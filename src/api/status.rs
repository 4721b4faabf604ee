//! Service liveness endpoint

use axum::Json;
use serde::Serialize;

/// Status response
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Report that the bridge is up and serving
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "online",
        message: "Voice bridge is running",
    })
}
