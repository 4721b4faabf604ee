//! Backend selection with fallback

use crate::audio::backend::{CaptureBackend, CaptureOutcome};

/// Tries capture backends in priority order
///
/// An unavailable device falls through to the next backend. A timeout stops
/// the chain: hearing nothing says nothing about device availability, and
/// re-listening on another backend would double the caller's wait.
pub struct CaptureOrchestrator {
    backends: Vec<Box<dyn CaptureBackend>>,
}

impl CaptureOrchestrator {
    /// Create an orchestrator over an ordered backend list
    #[must_use]
    pub fn new(backends: Vec<Box<dyn CaptureBackend>>) -> Self {
        Self { backends }
    }

    /// Acquire one audio frame from the first backend that can deliver
    #[must_use]
    pub fn acquire(&self) -> CaptureOutcome {
        for backend in &self.backends {
            tracing::debug!(backend = backend.name(), "trying capture backend");
            match backend.capture() {
                CaptureOutcome::DeviceUnavailable(reason) => {
                    tracing::warn!(
                        backend = backend.name(),
                        %reason,
                        "capture device unavailable, falling back"
                    );
                }
                outcome => return outcome,
            }
        }

        tracing::warn!("all capture backends exhausted");
        CaptureOutcome::Exhausted
    }
}
