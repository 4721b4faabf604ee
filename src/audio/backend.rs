//! Capture backends and their shared outcome contract

use crate::audio::AudioFrame;

/// Outcome of one capture attempt
///
/// The orchestrator decides fall-through versus stop on the variant alone,
/// never on message text.
#[derive(Debug)]
pub enum CaptureOutcome {
    /// Audio was acquired
    Success(AudioFrame),

    /// No usable input device; the next backend may still work
    DeviceUnavailable(String),

    /// No speech arrived within the configured bound
    Timeout,

    /// Every backend reported an unavailable device
    Exhausted,
}

/// One strategy for acquiring a single audio buffer from the microphone
///
/// Implementations block for at most their configured bound and release the
/// device handle on every exit path.
pub trait CaptureBackend: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Acquire one audio buffer
    fn capture(&self) -> CaptureOutcome;
}
