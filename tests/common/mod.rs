//! Shared test utilities
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use voice_bridge::api::ApiState;
use voice_bridge::audio::{AudioFrame, CaptureBackend, CaptureOrchestrator, CaptureOutcome};
use voice_bridge::stt::{Transcriber, TranscriptionResult};
use voice_bridge::synth::{SpeechEngine, SynthesisWorker};
use voice_bridge::{Error, Result};

/// A small mono frame standing in for captured speech
pub fn sample_frame() -> AudioFrame {
    let samples: Vec<f32> = (0..1600)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f32 / 16_000.0;
            0.3 * (2.0 * std::f32::consts::PI * 440.0 * t).sin()
        })
        .collect();
    AudioFrame::from_f32_mono(&samples, 16_000, None)
}

/// What a scripted backend should do when invoked
pub enum Script {
    Succeed,
    Unavailable,
    TimeOut,
}

/// Capture backend that follows a fixed script and counts invocations
pub struct ScriptedBackend {
    script: Script,
    calls: Arc<AtomicUsize>,
}

impl ScriptedBackend {
    /// Build a boxed backend plus a handle on its invocation counter
    pub fn new(script: Script) -> (Box<dyn CaptureBackend>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let backend = Self {
            script,
            calls: Arc::clone(&calls),
        };
        (Box::new(backend), calls)
    }
}

impl CaptureBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn capture(&self) -> CaptureOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script {
            Script::Succeed => CaptureOutcome::Success(sample_frame()),
            Script::Unavailable => CaptureOutcome::DeviceUnavailable("no device".to_string()),
            Script::TimeOut => CaptureOutcome::Timeout,
        }
    }
}

/// Transcriber that always returns the same result
pub struct StaticTranscriber {
    result: TranscriptionResult,
}

impl StaticTranscriber {
    pub fn new(result: TranscriptionResult) -> Arc<dyn Transcriber> {
        Arc::new(Self { result })
    }
}

#[async_trait]
impl Transcriber for StaticTranscriber {
    async fn transcribe(&self, _frame: &AudioFrame) -> TranscriptionResult {
        self.result.clone()
    }
}

/// Engine that records invocations, optionally simulating slow playback
pub struct RecordingEngine {
    calls: Arc<AtomicUsize>,
    delay: Option<Duration>,
    fail: bool,
}

impl RecordingEngine {
    pub fn new() -> (Arc<dyn SpeechEngine>, Arc<AtomicUsize>) {
        Self::build(None, false)
    }

    pub fn slow(delay: Duration) -> (Arc<dyn SpeechEngine>, Arc<AtomicUsize>) {
        Self::build(Some(delay), false)
    }

    pub fn failing() -> (Arc<dyn SpeechEngine>, Arc<AtomicUsize>) {
        Self::build(None, true)
    }

    fn build(delay: Option<Duration>, fail: bool) -> (Arc<dyn SpeechEngine>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let engine = Self {
            calls: Arc::clone(&calls),
            delay,
            fail,
        };
        (Arc::new(engine), calls)
    }
}

impl SpeechEngine for RecordingEngine {
    fn speak(&self, _text: &str) -> Result<()> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::Tts("engine unavailable".to_string()));
        }
        Ok(())
    }
}

/// Assemble API state from test doubles
pub fn test_state(
    backends: Vec<Box<dyn CaptureBackend>>,
    transcriber: Arc<dyn Transcriber>,
    engine: Arc<dyn SpeechEngine>,
) -> Arc<ApiState> {
    Arc::new(ApiState {
        capture: CaptureOrchestrator::new(backends),
        capture_lock: tokio::sync::Mutex::new(()),
        transcriber,
        synthesis: SynthesisWorker::new(engine),
    })
}

/// Poll a counter until it reaches `expected` or a few seconds pass
pub async fn wait_for_count(calls: &Arc<AtomicUsize>, expected: usize) -> bool {
    for _ in 0..300 {
        if calls.load(Ordering::SeqCst) == expected {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    calls.load(Ordering::SeqCst) == expected
}
