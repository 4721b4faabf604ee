//! Energy-gated streaming capture
//!
//! Calibrates an energy threshold against ambient noise, waits for speech
//! onset, then records until the speaker goes quiet or the phrase bound is
//! reached.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::audio::backend::{CaptureBackend, CaptureOutcome};
use crate::audio::device;
use crate::audio::frame::AudioFrame;

/// Sample rate for streaming capture (16kHz for speech)
pub const STREAM_SAMPLE_RATE: u32 = 16_000;

/// Threshold floor when the room is close to silent
const MIN_ENERGY_THRESHOLD: f32 = 0.01;

/// Headroom multiplier above the measured ambient energy
const AMBIENT_MARGIN: f32 = 1.8;

/// Trailing quiet that ends a phrase
const TRAILING_SILENCE: Duration = Duration::from_millis(700);

/// Poll interval while watching the capture buffer
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Tuning for one streaming listen
#[derive(Debug, Clone, Copy)]
pub struct StreamingConfig {
    /// Ambient-noise calibration window
    pub calibration_window: Duration,

    /// Bound on waiting for speech onset
    pub silence_timeout: Duration,

    /// Bound on a single phrase
    pub max_phrase: Duration,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            calibration_window: Duration::from_millis(500),
            silence_timeout: Duration::from_secs(5),
            max_phrase: Duration::from_secs(10),
        }
    }
}

/// Primary capture backend: ambient calibration plus a bounded listen
pub struct StreamingCapture {
    config: StreamingConfig,
}

impl StreamingCapture {
    /// Create a streaming backend with the given bounds
    #[must_use]
    pub const fn new(config: StreamingConfig) -> Self {
        Self { config }
    }

    fn listen(&self) -> CaptureOutcome {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let stream = match device::open_mono_input(STREAM_SAMPLE_RATE, Arc::clone(&buffer)) {
            Ok(stream) => stream,
            Err(reason) => return CaptureOutcome::DeviceUnavailable(reason),
        };

        // Calibration: measure the room before treating anything as speech.
        std::thread::sleep(self.config.calibration_window);
        let ambient = device::drain(&buffer);
        let threshold = energy_threshold(&ambient);
        tracing::debug!(
            threshold,
            ambient_samples = ambient.len(),
            "ambient calibration complete"
        );

        // Wait for speech onset within the silence timeout.
        let mut phrase: Vec<f32> = Vec::new();
        let waiting_since = Instant::now();
        loop {
            std::thread::sleep(POLL_INTERVAL);
            let chunk = device::drain(&buffer);
            if rms(&chunk) > threshold {
                phrase.extend_from_slice(&chunk);
                break;
            }
            if waiting_since.elapsed() >= self.config.silence_timeout {
                // The stream handle drops here, releasing the device.
                return CaptureOutcome::Timeout;
            }
        }

        // Accumulate until the speaker goes quiet or the phrase bound hits.
        let phrase_start = Instant::now();
        let mut quiet_for = Duration::ZERO;
        while phrase_start.elapsed() < self.config.max_phrase {
            std::thread::sleep(POLL_INTERVAL);
            let chunk = device::drain(&buffer);
            if rms(&chunk) > threshold {
                quiet_for = Duration::ZERO;
            } else {
                quiet_for += POLL_INTERVAL;
            }
            phrase.extend_from_slice(&chunk);

            if quiet_for >= TRAILING_SILENCE {
                break;
            }
        }

        drop(stream);
        tracing::debug!(samples = phrase.len(), "phrase captured");

        CaptureOutcome::Success(AudioFrame::from_f32_mono(&phrase, STREAM_SAMPLE_RATE, None))
    }
}

impl CaptureBackend for StreamingCapture {
    fn name(&self) -> &'static str {
        "streaming"
    }

    fn capture(&self) -> CaptureOutcome {
        self.listen()
    }
}

/// RMS energy of a sample chunk
#[allow(clippy::cast_precision_loss)]
fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

/// Speech threshold derived from ambient energy, with a floor for quiet rooms
fn energy_threshold(ambient: &[f32]) -> f32 {
    (rms(ambient) * AMBIENT_MARGIN).max(MIN_ENERGY_THRESHOLD)
}
