//! HTTP API for the voice bridge

pub mod listen;
pub mod speak;
pub mod status;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::Result;
use crate::audio::CaptureOrchestrator;
use crate::stt::Transcriber;
use crate::synth::SynthesisWorker;

/// Shared state for API handlers
pub struct ApiState {
    /// Capture strategy chain for listen requests
    pub capture: CaptureOrchestrator,

    /// Serializes listen requests; the microphone is a single exclusive device
    pub capture_lock: Mutex<()>,

    /// Transcription provider client
    pub transcriber: Arc<dyn Transcriber>,

    /// Background synthesis dispatcher
    pub synthesis: SynthesisWorker,
}

/// Build the router with all routes
///
/// CORS is wide open so a browser frontend on any origin can reach the
/// bridge.
#[must_use]
pub fn router(state: Arc<ApiState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/status", get(status::status))
        .route("/speak", post(speak::speak))
        .route("/listen", post(listen::listen))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// API server
pub struct ApiServer {
    state: Arc<ApiState>,
    port: u16,
}

impl ApiServer {
    /// Create a server over prepared state
    #[must_use]
    pub const fn new(state: Arc<ApiState>, port: u16) -> Self {
        Self { state, port }
    }

    /// Run the API server
    ///
    /// # Errors
    ///
    /// Returns error if the server fails to bind or run
    pub async fn run(self) -> Result<()> {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| crate::Error::Config(format!("failed to bind API server: {e}")))?;

        tracing::info!(port = self.port, "voice bridge listening");

        axum::serve(listener, router(self.state))
            .await
            .map_err(|e| crate::Error::Config(format!("API server error: {e}")))?;

        Ok(())
    }
}
