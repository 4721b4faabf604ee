//! Fire-and-forget speech synthesis endpoint

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use super::ApiState;

/// Synthesis request body
#[derive(Debug, Default, Deserialize)]
pub struct SpeakRequest {
    /// Text to speak
    #[serde(default)]
    pub text: String,
}

/// Synthesis acknowledgement
#[derive(Serialize)]
pub struct SpeakResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Error body for a rejected speak request
#[derive(Serialize)]
pub struct SpeakError {
    pub success: bool,
    pub error: &'static str,
}

/// Start speaking in the background and acknowledge immediately
///
/// The body is parsed leniently: a missing or malformed body counts as
/// missing text, so the client always gets the JSON error contract back.
pub async fn speak(
    State(state): State<Arc<ApiState>>,
    body: Bytes,
) -> std::result::Result<Json<SpeakResponse>, (StatusCode, Json<SpeakError>)> {
    let request: SpeakRequest = serde_json::from_slice(&body).unwrap_or_default();

    if request.text.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(SpeakError {
                success: false,
                error: "No text provided",
            }),
        ));
    }

    // The handle is dropped on purpose: the task runs detached and the
    // caller never learns about synthesis failures.
    drop(state.synthesis.speak(request.text));

    Ok(Json(SpeakResponse {
        success: true,
        message: "Speaking started",
    }))
}
