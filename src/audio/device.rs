//! Shared input-device plumbing for the capture backends

use std::sync::{Arc, Mutex};

use cpal::SampleRate;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

/// Open the default input device and start a mono f32 stream at
/// `sample_rate`, appending every callback chunk to `buffer`
///
/// The returned handle owns the device acquisition; dropping it releases the
/// device, so callers get release-on-every-exit-path for free.
pub(super) fn open_mono_input(
    sample_rate: u32,
    buffer: Arc<Mutex<Vec<f32>>>,
) -> Result<cpal::Stream, String> {
    let host = cpal::default_host();

    let device = host
        .default_input_device()
        .ok_or_else(|| "no input device available".to_string())?;

    let supported = device
        .supported_input_configs()
        .map_err(|e| e.to_string())?
        .find(|c| {
            c.channels() == 1
                && c.min_sample_rate() <= SampleRate(sample_rate)
                && c.max_sample_rate() >= SampleRate(sample_rate)
        })
        .ok_or_else(|| "no suitable input config found".to_string())?;

    let config = supported.with_sample_rate(SampleRate(sample_rate)).config();

    tracing::debug!(
        device = device.name().unwrap_or_default(),
        sample_rate,
        "input device opened"
    );

    let stream = device
        .build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                if let Ok(mut buf) = buffer.lock() {
                    buf.extend_from_slice(data);
                }
            },
            |err| {
                tracing::error!(error = %err, "input stream error");
            },
            None,
        )
        .map_err(|e| e.to_string())?;

    stream.play().map_err(|e| e.to_string())?;

    Ok(stream)
}

/// Take everything buffered so far, leaving the buffer empty
pub(super) fn drain(buffer: &Arc<Mutex<Vec<f32>>>) -> Vec<f32> {
    buffer
        .lock()
        .map(|mut buf| std::mem::take(&mut *buf))
        .unwrap_or_default()
}
