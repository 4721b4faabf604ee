//! Capture-and-transcribe endpoint

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::ApiState;
use crate::audio::CaptureOutcome;
use crate::stt::TranscriptionResult;

/// Successful transcription body
#[derive(Serialize)]
pub struct ListenResponse {
    pub success: bool,
    pub text: String,
}

/// Listen failures, mapped onto the response contract
#[derive(Debug)]
pub enum ListenError {
    /// No speech within the configured bound
    Timeout,

    /// The provider could not make out any words
    Unintelligible,

    /// The provider call failed
    Provider(String),

    /// No capture backend could deliver audio
    Exhausted,

    /// The capture task itself failed
    Internal(String),
}

impl IntoResponse for ListenError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            success: bool,
            error: String,
        }

        let (status, error) = match self {
            Self::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "No speech detected (timeout)".to_string(),
            ),
            Self::Unintelligible => (
                StatusCode::BAD_REQUEST,
                "Could not understand audio".to_string(),
            ),
            Self::Provider(message) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("Speech API error: {message}"),
            ),
            Self::Exhausted => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Microphone not available".to_string(),
            ),
            Self::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error,
            }),
        )
            .into_response()
    }
}

/// Capture one phrase from the microphone and transcribe it
pub async fn listen(
    State(state): State<Arc<ApiState>>,
) -> std::result::Result<Json<ListenResponse>, ListenError> {
    tracing::info!("listening");

    let frame = {
        // Held across capture only; transcription has no exclusivity needs.
        let _guard = state.capture_lock.lock().await;

        let capture_state = Arc::clone(&state);
        let outcome = tokio::task::spawn_blocking(move || capture_state.capture.acquire())
            .await
            .map_err(|e| ListenError::Internal(format!("capture task failed: {e}")))?;

        match outcome {
            CaptureOutcome::Success(frame) => frame,
            CaptureOutcome::Timeout => return Err(ListenError::Timeout),
            CaptureOutcome::Exhausted => return Err(ListenError::Exhausted),
            // The orchestrator recovers from unavailable devices itself; a
            // variant leaking through is an unexpected failure.
            CaptureOutcome::DeviceUnavailable(reason) => {
                return Err(ListenError::Internal(format!("capture failed: {reason}")));
            }
        }
    };

    match state.transcriber.transcribe(&frame).await {
        TranscriptionResult::Recognized(text) => Ok(Json(ListenResponse {
            success: true,
            text,
        })),
        TranscriptionResult::Unintelligible => Err(ListenError::Unintelligible),
        TranscriptionResult::ProviderError(message) => Err(ListenError::Provider(message)),
    }
}
