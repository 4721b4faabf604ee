//! Voice Bridge - local speech in and out over HTTP
//!
//! This library exposes the machine's microphone and speech synthesizer to a
//! remote client (typically a browser frontend) through three endpoints:
//! - `GET /status` - liveness
//! - `POST /speak` - fire-and-forget text-to-speech
//! - `POST /listen` - capture one phrase from the microphone and transcribe it
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                HTTP API (axum)                   │
//! │   /status   │   /speak      │   /listen         │
//! └─────────────┬───────────────┬───────────────────┘
//!               │               │
//!       ┌───────▼──────┐ ┌──────▼───────────────────┐
//!       │  Synthesis   │ │  Capture orchestrator     │
//!       │  worker      │ │  streaming → fixed window │
//!       └───────┬──────┘ └──────┬───────────────────┘
//!               │               │
//!       ┌───────▼──────┐ ┌──────▼───────────────────┐
//!       │  System TTS  │ │  Transcription provider   │
//!       │  engine      │ │  (HTTP)                   │
//!       └──────────────┘ └──────────────────────────┘
//! ```

pub mod api;
pub mod audio;
pub mod config;
pub mod error;
pub mod stt;
pub mod synth;

pub use config::Config;
pub use error::{Error, Result};
