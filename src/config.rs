//! Configuration for the voice bridge
//!
//! Values resolve in three layers: built-in defaults, then an optional TOML
//! file, then environment variables. CLI flags (see `main.rs`) sit on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::Result;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Default config file path, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "voice-bridge.toml";

/// Default transcription provider endpoint
const DEFAULT_STT_BASE_URL: &str = "https://api.openai.com";

/// Default transcription model
const DEFAULT_STT_MODEL: &str = "whisper-1";

/// Default speaking rate in words per minute
const DEFAULT_TTS_RATE: u16 = 150;

/// Voice bridge configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP port to listen on
    pub port: u16,

    /// Capture tuning
    pub capture: CaptureConfig,

    /// Transcription provider settings
    pub stt: SttConfig,

    /// Synthesis engine settings
    pub tts: TtsConfig,
}

/// Capture tuning for both backends
#[derive(Debug, Clone, Copy)]
pub struct CaptureConfig {
    /// Ambient-noise calibration window before listening
    pub calibration_window: Duration,

    /// Bound on waiting for speech onset
    pub silence_timeout: Duration,

    /// Bound on a single phrase
    pub max_phrase: Duration,

    /// Fixed recording window for the fallback backend
    pub fallback_duration: Duration,

    /// Sample rate for the fallback backend
    pub fallback_sample_rate: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            calibration_window: Duration::from_millis(500),
            silence_timeout: Duration::from_secs(5),
            max_phrase: Duration::from_secs(10),
            fallback_duration: Duration::from_secs(5),
            fallback_sample_rate: 44_100,
        }
    }
}

/// Transcription provider settings
#[derive(Debug, Clone)]
pub struct SttConfig {
    /// Provider base URL (OpenAI-compatible transcription API)
    pub base_url: String,

    /// Bearer token; optional for self-hosted providers
    pub api_key: Option<String>,

    /// Model identifier sent with each request
    pub model: String,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_STT_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_STT_MODEL.to_string(),
        }
    }
}

/// Synthesis engine settings
#[derive(Debug, Clone)]
pub struct TtsConfig {
    /// Explicit synthesizer binary; discovered on PATH when unset
    pub program: Option<PathBuf>,

    /// Speaking rate in words per minute
    pub rate: u16,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            program: None,
            rate: DEFAULT_TTS_RATE,
        }
    }
}

impl Config {
    /// Load configuration from the optional TOML file and the environment
    ///
    /// Environment variables override file values: `STT_BASE_URL`,
    /// `STT_API_KEY`, `STT_MODEL`, `TTS_PROGRAM`, `TTS_RATE`. The port is
    /// also overridable via `VOICE_BRIDGE_PORT`, handled by the CLI layer.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let fc = ConfigFile::load(path)?;

        let defaults = CaptureConfig::default();
        let capture = CaptureConfig {
            calibration_window: duration_or(fc.capture.calibration_window_secs, defaults.calibration_window),
            silence_timeout: duration_or(fc.capture.silence_timeout_secs, defaults.silence_timeout),
            max_phrase: duration_or(fc.capture.max_phrase_secs, defaults.max_phrase),
            fallback_duration: duration_or(fc.capture.fallback_duration_secs, defaults.fallback_duration),
            fallback_sample_rate: fc
                .capture
                .fallback_sample_rate
                .unwrap_or(defaults.fallback_sample_rate),
        };

        let stt = SttConfig {
            base_url: env_var("STT_BASE_URL")
                .or(fc.stt.base_url)
                .unwrap_or_else(|| DEFAULT_STT_BASE_URL.to_string()),
            api_key: env_var("STT_API_KEY").or(fc.stt.api_key),
            model: env_var("STT_MODEL")
                .or(fc.stt.model)
                .unwrap_or_else(|| DEFAULT_STT_MODEL.to_string()),
        };

        let tts = TtsConfig {
            program: env_var("TTS_PROGRAM").map(PathBuf::from).or(fc.tts.program),
            rate: env_var("TTS_RATE")
                .and_then(|v| v.parse().ok())
                .or(fc.tts.rate)
                .unwrap_or(DEFAULT_TTS_RATE),
        };

        let port = fc.server.port.unwrap_or(DEFAULT_PORT);

        Ok(Self {
            port,
            capture,
            stt,
            tts,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            capture: CaptureConfig::default(),
            stt: SttConfig::default(),
            tts: TtsConfig::default(),
        }
    }
}

/// Read an environment variable, treating empty values as unset
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Seconds-as-float file field into a Duration, falling back to the default
fn duration_or(secs: Option<f64>, default: Duration) -> Duration {
    secs.filter(|s| s.is_finite() && *s >= 0.0)
        .map_or(default, Duration::from_secs_f64)
}

/// Top-level TOML configuration file schema
///
/// All fields are optional - the file is a partial overlay on top of defaults.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    server: ServerFileConfig,

    #[serde(default)]
    capture: CaptureFileConfig,

    #[serde(default)]
    stt: SttFileConfig,

    #[serde(default)]
    tts: TtsFileConfig,
}

/// Server section
#[derive(Debug, Default, Deserialize)]
struct ServerFileConfig {
    /// Port to listen on
    port: Option<u16>,
}

/// Capture tuning section
#[derive(Debug, Default, Deserialize)]
struct CaptureFileConfig {
    calibration_window_secs: Option<f64>,
    silence_timeout_secs: Option<f64>,
    max_phrase_secs: Option<f64>,
    fallback_duration_secs: Option<f64>,
    fallback_sample_rate: Option<u32>,
}

/// Transcription provider section
#[derive(Debug, Default, Deserialize)]
struct SttFileConfig {
    base_url: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
}

/// Synthesis section
#[derive(Debug, Default, Deserialize)]
struct TtsFileConfig {
    program: Option<PathBuf>,
    rate: Option<u16>,
}

impl ConfigFile {
    /// Load the file at `path`, or the default path, or empty defaults when
    /// no file exists
    fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)?;
        let file = toml::from_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(file)
    }
}
