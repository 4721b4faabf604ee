//! Audio pipeline tests without hardware

use std::io::Cursor;

use voice_bridge::audio::{AudioFrame, STREAM_SAMPLE_RATE, f32_to_i16};

/// Generate sine wave audio samples
fn generate_sine_samples(frequency: f32, duration_secs: f32, amplitude: f32) -> Vec<f32> {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let num_samples = (STREAM_SAMPLE_RATE as f32 * duration_secs) as usize;
    (0..num_samples)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f32 / STREAM_SAMPLE_RATE as f32;
            amplitude * (2.0 * std::f32::consts::PI * frequency * t).sin()
        })
        .collect()
}

#[test]
fn frame_wav_has_riff_header() {
    let samples = generate_sine_samples(440.0, 0.1, 0.5);
    let frame = AudioFrame::from_f32_mono(&samples, STREAM_SAMPLE_RATE, None);
    let wav = frame.to_wav().unwrap();

    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(&wav[8..12], b"WAVE");
    assert!(wav.len() > 44);
}

#[test]
fn frame_wav_roundtrip() {
    let original = [0.0f32, 0.5, -0.5, 1.0, -1.0, 0.25];
    let frame = AudioFrame::from_f32_mono(&original, STREAM_SAMPLE_RATE, None);
    let wav = frame.to_wav().unwrap();

    let mut reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.sample_rate, STREAM_SAMPLE_RATE);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);

    let read_samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    let expected: Vec<i16> = original.iter().copied().map(f32_to_i16).collect();
    assert_eq!(read_samples, expected);
}

#[test]
fn overdriven_audio_saturates_within_pcm_range() {
    // Amplitude above 1.0 must clip, never wrap around.
    let samples = generate_sine_samples(440.0, 0.2, 1.5);
    let frame = AudioFrame::from_f32_mono(&samples, STREAM_SAMPLE_RATE, None);

    let peak = frame.samples.iter().copied().max().unwrap();
    let trough = frame.samples.iter().copied().min().unwrap();
    assert_eq!(peak, 32767);
    assert_eq!(trough, -32768);
}

#[test]
fn frame_duration_matches_sample_count() {
    let samples = generate_sine_samples(440.0, 1.0, 0.3);
    let frame = AudioFrame::from_f32_mono(&samples, STREAM_SAMPLE_RATE, None);
    assert!((frame.duration_secs() - 1.0).abs() < 0.01);
}
