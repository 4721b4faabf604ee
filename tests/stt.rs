//! Transcription client tests against a mocked provider

use voice_bridge::audio::AudioFrame;
use voice_bridge::config::SttConfig;
use voice_bridge::stt::{SpeechToText, Transcriber, TranscriptionResult};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn frame() -> AudioFrame {
    AudioFrame::from_f32_mono(&[0.1f32; 1600], 16_000, None)
}

fn config(base_url: String, api_key: Option<String>) -> SttConfig {
    SttConfig {
        base_url,
        api_key,
        model: "whisper-1".to_string(),
    }
}

#[tokio::test]
async fn recognized_text_passes_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/audio/transcriptions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": "turn on pump 3"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let stt = SpeechToText::new(&config(server.uri(), None));
    let result = stt.transcribe(&frame()).await;

    assert_eq!(
        result,
        TranscriptionResult::Recognized("turn on pump 3".to_string())
    );
}

#[tokio::test]
async fn blank_transcript_is_unintelligible() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": "  "})))
        .mount(&server)
        .await;

    let stt = SpeechToText::new(&config(server.uri(), None));
    assert_eq!(
        stt.transcribe(&frame()).await,
        TranscriptionResult::Unintelligible
    );
}

#[tokio::test]
async fn provider_failure_carries_the_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let stt = SpeechToText::new(&config(server.uri(), None));
    match stt.transcribe(&frame()).await {
        TranscriptionResult::ProviderError(message) => {
            assert!(message.contains("500"), "missing status in: {message}");
        }
        other => panic!("expected ProviderError, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_provider_is_a_provider_error() {
    // Nothing listens on port 1.
    let stt = SpeechToText::new(&config("http://127.0.0.1:1".to_string(), None));
    assert!(matches!(
        stt.transcribe(&frame()).await,
        TranscriptionResult::ProviderError(_)
    ));
}

#[tokio::test]
async fn malformed_response_is_a_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let stt = SpeechToText::new(&config(server.uri(), None));
    assert!(matches!(
        stt.transcribe(&frame()).await,
        TranscriptionResult::ProviderError(_)
    ));
}

#[tokio::test]
async fn bearer_token_is_sent_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/audio/transcriptions"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let stt = SpeechToText::new(&config(server.uri(), Some("test-key".to_string())));
    assert_eq!(
        stt.transcribe(&frame()).await,
        TranscriptionResult::Recognized("ok".to_string())
    );
}
