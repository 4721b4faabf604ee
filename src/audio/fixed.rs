//! Fixed-window fallback capture
//!
//! Records for an exact duration with no speech detection. The result always
//! holds exactly `duration * sample_rate` samples, so downstream consumers
//! can rely on the window size.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::audio::backend::{CaptureBackend, CaptureOutcome};
use crate::audio::device;
use crate::audio::frame::AudioFrame;

/// Fallback capture backend: a blocking fixed-duration recording
pub struct FixedDurationCapture {
    duration: Duration,
    sample_rate: u32,
}

impl FixedDurationCapture {
    /// Create a backend recording `duration` of mono audio at `sample_rate`
    #[must_use]
    pub const fn new(duration: Duration, sample_rate: u32) -> Self {
        Self {
            duration,
            sample_rate,
        }
    }

    fn record(&self) -> CaptureOutcome {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let stream = match device::open_mono_input(self.sample_rate, Arc::clone(&buffer)) {
            Ok(stream) => stream,
            Err(reason) => return CaptureOutcome::DeviceUnavailable(reason),
        };

        std::thread::sleep(self.duration);
        drop(stream);

        let mut samples = device::drain(&buffer);
        // Callback chunks rarely land on the window boundary; pad or truncate
        // to the exact sample count.
        samples.resize(expected_samples(self.duration, self.sample_rate), 0.0);

        tracing::debug!(
            samples = samples.len(),
            sample_rate = self.sample_rate,
            "fixed window captured"
        );

        CaptureOutcome::Success(AudioFrame::from_f32_mono(
            &samples,
            self.sample_rate,
            Some(self.duration.as_secs_f32()),
        ))
    }
}

impl CaptureBackend for FixedDurationCapture {
    fn name(&self) -> &'static str {
        "fixed-window"
    }

    fn capture(&self) -> CaptureOutcome {
        self.record()
    }
}

/// Exact sample count for one recording window
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn expected_samples(duration: Duration, sample_rate: u32) -> usize {
    (duration.as_secs_f64() * f64::from(sample_rate)).round() as usize
}
