//! Text-to-speech on the local machine
//!
//! Synthesis runs on a blocking task off the request path, so the HTTP
//! response goes out before playback starts. Failures are logged and
//! swallowed; the caller already has its acknowledgement and there is no
//! channel back.

use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;

use crate::{Error, Result};

/// Candidate synthesizer binaries, in preference order
const ENGINE_CANDIDATES: &[&str] = &["espeak-ng", "espeak", "say", "spd-say"];

/// A local speech-synthesis engine
pub trait SpeechEngine: Send + Sync {
    /// Speak the text, blocking until playback finishes
    ///
    /// # Errors
    ///
    /// Returns error if the engine cannot be started or reports failure
    fn speak(&self, text: &str) -> Result<()>;
}

/// Speaks through a system synthesizer binary
///
/// Each invocation spawns a fresh process and waits for it to exit, so no
/// engine state survives a request and a failed startup cannot leave a
/// half-initialized engine behind.
pub struct SystemSpeech {
    program: PathBuf,
    rate: u16,
}

impl SystemSpeech {
    /// Locate a synthesizer on the PATH
    ///
    /// # Errors
    ///
    /// Returns error if no candidate binary is installed
    pub fn discover(rate: u16) -> Result<Self> {
        let program = ENGINE_CANDIDATES
            .iter()
            .find_map(|name| which::which(name).ok())
            .ok_or_else(|| {
                Error::Tts(format!(
                    "no speech synthesizer found (tried {})",
                    ENGINE_CANDIDATES.join(", ")
                ))
            })?;

        tracing::debug!(program = %program.display(), rate, "speech engine located");
        Ok(Self { program, rate })
    }

    /// Use a specific synthesizer binary
    #[must_use]
    pub const fn with_program(program: PathBuf, rate: u16) -> Self {
        Self { program, rate }
    }

    /// Rate flag for the located binary: `say` takes `-r`, the espeak family
    /// and `spd-say` take `-s`
    fn rate_flag(&self) -> &'static str {
        if self.program.file_stem().is_some_and(|stem| stem == "say") {
            "-r"
        } else {
            "-s"
        }
    }
}

impl SpeechEngine for SystemSpeech {
    fn speak(&self, text: &str) -> Result<()> {
        let status = Command::new(&self.program)
            .arg(self.rate_flag())
            .arg(self.rate.to_string())
            .arg(text)
            .status()
            .map_err(|e| {
                Error::Tts(format!("failed to start {}: {e}", self.program.display()))
            })?;

        if !status.success() {
            return Err(Error::Tts(format!(
                "{} exited with {status}",
                self.program.display()
            )));
        }

        Ok(())
    }
}

/// Dispatches speak requests onto blocking tasks, fire-and-forget
#[derive(Clone)]
pub struct SynthesisWorker {
    engine: Arc<dyn SpeechEngine>,
}

impl SynthesisWorker {
    /// Create a worker around an engine
    #[must_use]
    pub fn new(engine: Arc<dyn SpeechEngine>) -> Self {
        Self { engine }
    }

    /// Speak in the background, returning without waiting for playback
    pub fn speak(&self, text: String) -> tokio::task::JoinHandle<()> {
        let engine = Arc::clone(&self.engine);
        tokio::task::spawn_blocking(move || {
            tracing::info!(chars = text.len(), "speaking");
            if let Err(e) = engine.speak(&text) {
                tracing::error!(error = %e, "synthesis failed");
            }
        })
    }
}
