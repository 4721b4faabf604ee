//! Speech-to-text through an external transcription provider

use async_trait::async_trait;

use crate::audio::AudioFrame;
use crate::config::SttConfig;
use crate::{Error, Result};

/// Outcome of one transcription attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptionResult {
    /// The provider produced text
    Recognized(String),

    /// The provider handled the audio but found no recognizable speech
    Unintelligible,

    /// The provider could not be reached or failed
    ProviderError(String),
}

/// Converts one captured audio frame into text
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe a single frame; one attempt, no retry
    async fn transcribe(&self, frame: &AudioFrame) -> TranscriptionResult;
}

/// Response from the transcription API
#[derive(serde::Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Transcribes speech through an OpenAI-compatible
/// `/v1/audio/transcriptions` endpoint
pub struct SpeechToText {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl SpeechToText {
    /// Create a new STT client from provider settings
    #[must_use]
    pub fn new(config: &SttConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    async fn request(&self, wav: Vec<u8>) -> Result<String> {
        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(wav)
                    .file_name("audio.wav")
                    .mime_str("audio/wav")
                    .map_err(|e| Error::Stt(e.to_string()))?,
            )
            .text("model", self.model.clone());

        let mut request = self
            .client
            .post(format!("{}/v1/audio/transcriptions", self.base_url))
            .multipart(form);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Stt(format!(
                "transcription API error {status}: {body}"
            )));
        }

        let result: TranscriptionResponse = response.json().await?;
        Ok(result.text)
    }
}

#[async_trait]
impl Transcriber for SpeechToText {
    async fn transcribe(&self, frame: &AudioFrame) -> TranscriptionResult {
        let wav = match frame.to_wav() {
            Ok(wav) => wav,
            Err(e) => return TranscriptionResult::ProviderError(e.to_string()),
        };

        tracing::debug!(audio_bytes = wav.len(), "starting transcription");

        match self.request(wav).await {
            Ok(text) if text.trim().is_empty() => {
                tracing::debug!("provider returned an empty transcript");
                TranscriptionResult::Unintelligible
            }
            Ok(text) => {
                tracing::info!(transcript = %text, "transcription complete");
                TranscriptionResult::Recognized(text)
            }
            Err(e) => {
                tracing::error!(error = %e, "transcription failed");
                TranscriptionResult::ProviderError(e.to_string())
            }
        }
    }
}
