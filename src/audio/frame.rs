//! Captured audio buffers and PCM conversion

use crate::{Error, Result};

/// One captured audio buffer in signed 16-bit PCM
///
/// Created by exactly one capture backend invocation and consumed once by
/// the transcription step; nothing is persisted beyond the request.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioFrame {
    /// Interleaved PCM samples
    pub samples: Vec<i16>,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Channel count
    pub channels: u16,

    /// Capture duration in seconds, when the backend fixed it up front
    pub duration_hint: Option<f32>,
}

impl AudioFrame {
    /// Wrap f32 capture samples as a mono PCM frame
    #[must_use]
    pub fn from_f32_mono(samples: &[f32], sample_rate: u32, duration_hint: Option<f32>) -> Self {
        Self {
            samples: samples.iter().copied().map(f32_to_i16).collect(),
            sample_rate,
            channels: 1,
            duration_hint,
        }
    }

    /// Duration in seconds derived from the sample count
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / (self.sample_rate as f32 * f32::from(self.channels))
    }

    /// Encode the frame as a 16-bit PCM WAV container for STT APIs
    ///
    /// # Errors
    ///
    /// Returns error if WAV encoding fails
    pub fn to_wav(&self) -> Result<Vec<u8>> {
        let spec = hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = std::io::Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)
                .map_err(|e| Error::Audio(e.to_string()))?;

            for &sample in &self.samples {
                writer
                    .write_sample(sample)
                    .map_err(|e| Error::Audio(e.to_string()))?;
            }

            writer.finalize().map_err(|e| Error::Audio(e.to_string()))?;
        }

        Ok(cursor.into_inner())
    }
}

/// Convert one f32 sample in [-1.0, 1.0] to i16, saturating out-of-range input
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn f32_to_i16(sample: f32) -> i16 {
    (sample * 32767.0).clamp(-32768.0, 32767.0) as i16
}
