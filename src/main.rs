use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use voice_bridge::api::{ApiServer, ApiState};
use voice_bridge::audio::{
    CaptureBackend, CaptureOrchestrator, CaptureOutcome, FixedDurationCapture, StreamingCapture,
    StreamingConfig,
};
use voice_bridge::config::TtsConfig;
use voice_bridge::stt::{SpeechToText, Transcriber, TranscriptionResult};
use voice_bridge::synth::{SpeechEngine, SynthesisWorker, SystemSpeech};
use voice_bridge::Config;

/// Voice bridge - local speech in and out over HTTP
#[derive(Parser)]
#[command(name = "voice-bridge", version, about)]
struct Cli {
    /// Port to listen on
    #[arg(long, env = "VOICE_BRIDGE_PORT")]
    port: Option<u16>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Test microphone input
    TestMic {
        /// Duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,
    },
    /// Test TTS output
    TestTts {
        /// Text to speak
        #[arg(default_value = "Hello! This is a test of the text to speech system.")]
        text: String,
    },
    /// Run one capture-and-transcribe pass and print the result
    ListenOnce,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,voice_bridge=info",
        1 => "info,voice_bridge=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.port = port;
    }

    if let Some(cmd) = cli.command {
        return match cmd {
            Command::TestMic { duration } => test_mic(duration).await,
            Command::TestTts { text } => test_tts(&config.tts, &text),
            Command::ListenOnce => listen_once(&config).await,
        };
    }

    tracing::info!(port = config.port, "starting voice bridge");

    let state = build_state(&config)?;
    ApiServer::new(state, config.port).run().await?;

    Ok(())
}

/// Wire the capture chain, transcription client, and synthesis worker
fn build_state(config: &Config) -> anyhow::Result<Arc<ApiState>> {
    Ok(Arc::new(ApiState {
        capture: build_orchestrator(config),
        capture_lock: tokio::sync::Mutex::new(()),
        transcriber: Arc::new(SpeechToText::new(&config.stt)),
        synthesis: SynthesisWorker::new(build_engine(&config.tts)?),
    }))
}

/// Streaming capture first, fixed-window recording as the fallback
fn build_orchestrator(config: &Config) -> CaptureOrchestrator {
    let backends: Vec<Box<dyn CaptureBackend>> = vec![
        Box::new(StreamingCapture::new(StreamingConfig {
            calibration_window: config.capture.calibration_window,
            silence_timeout: config.capture.silence_timeout,
            max_phrase: config.capture.max_phrase,
        })),
        Box::new(FixedDurationCapture::new(
            config.capture.fallback_duration,
            config.capture.fallback_sample_rate,
        )),
    ];
    CaptureOrchestrator::new(backends)
}

fn build_engine(tts: &TtsConfig) -> anyhow::Result<Arc<dyn SpeechEngine>> {
    let engine = match &tts.program {
        Some(program) => SystemSpeech::with_program(program.clone(), tts.rate),
        None => SystemSpeech::discover(tts.rate)?,
    };
    Ok(Arc::new(engine))
}

/// Record a short fixed window and report input levels
async fn test_mic(duration: u64) -> anyhow::Result<()> {
    println!("Testing microphone for {duration} seconds...");
    println!("Speak into your microphone!\n");

    let backend = FixedDurationCapture::new(Duration::from_secs(duration), 44_100);
    let outcome = tokio::task::spawn_blocking(move || backend.capture()).await?;

    match outcome {
        CaptureOutcome::Success(frame) => {
            let peak = frame
                .samples
                .iter()
                .map(|s| i32::from(*s).abs())
                .max()
                .unwrap_or(0);
            println!(
                "Captured {} samples at {} Hz",
                frame.samples.len(),
                frame.sample_rate
            );
            println!("RMS: {:.4} | Peak: {peak}", pcm_rms(&frame.samples));
            println!("\nIf RMS stayed near 0, check:");
            println!("  1. Is your mic plugged in?");
            println!("  2. Run: arecord -l (to list devices)");
            println!("  3. Try: pavucontrol (to check levels)");
        }
        CaptureOutcome::DeviceUnavailable(reason) => {
            println!("Microphone unavailable: {reason}");
        }
        CaptureOutcome::Timeout | CaptureOutcome::Exhausted => {
            println!("Capture failed unexpectedly");
        }
    }

    Ok(())
}

/// Drive the synthesis engine once in the foreground
fn test_tts(tts: &TtsConfig, text: &str) -> anyhow::Result<()> {
    println!("Testing TTS with text: \"{text}\"\n");

    let engine = build_engine(tts)?;
    engine.speak(text)?;

    println!("\nIf you heard the speech, TTS is working!");
    Ok(())
}

/// Run the full capture-and-transcribe pipeline once
async fn listen_once(config: &Config) -> anyhow::Result<()> {
    println!("Listening...");

    let orchestrator = build_orchestrator(config);
    let outcome = tokio::task::spawn_blocking(move || orchestrator.acquire()).await?;

    let frame = match outcome {
        CaptureOutcome::Success(frame) => frame,
        CaptureOutcome::Timeout => {
            println!("No speech detected (timeout)");
            return Ok(());
        }
        CaptureOutcome::DeviceUnavailable(reason) => {
            println!("Capture failed: {reason}");
            return Ok(());
        }
        CaptureOutcome::Exhausted => {
            println!("No capture backend could open a microphone");
            return Ok(());
        }
    };

    println!(
        "Captured {:.1}s of audio, transcribing...",
        frame.duration_secs()
    );

    let transcriber = SpeechToText::new(&config.stt);
    match transcriber.transcribe(&frame).await {
        TranscriptionResult::Recognized(text) => println!("Recognized: {text}"),
        TranscriptionResult::Unintelligible => println!("Could not understand audio"),
        TranscriptionResult::ProviderError(message) => println!("Speech API error: {message}"),
    }

    Ok(())
}

/// RMS of PCM samples, normalized to [0, 1]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn pcm_rms(samples: &[i16]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f64 = samples
        .iter()
        .map(|s| {
            let v = f64::from(*s) / 32768.0;
            v * v
        })
        .sum();
    (sum_squares / samples.len() as f64).sqrt() as f32
}
