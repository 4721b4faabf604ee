//! Audio capture
//!
//! Two capture backends behind one trait: an energy-gated streaming backend
//! and a fixed-window fallback. The orchestrator walks them in priority
//! order and normalizes their outcomes.

mod backend;
mod device;
mod fixed;
mod frame;
mod orchestrator;
mod streaming;

pub use backend::{CaptureBackend, CaptureOutcome};
pub use fixed::FixedDurationCapture;
pub use frame::{AudioFrame, f32_to_i16};
pub use orchestrator::CaptureOrchestrator;
pub use streaming::{STREAM_SAMPLE_RATE, StreamingCapture, StreamingConfig};
