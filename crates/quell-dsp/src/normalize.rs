//! Amplitude normalization to 16-bit range and conversion back
//!
//! Internal math runs in `f64` at full 16-bit scale: the input is boosted
//! so its peak sits at `i16::MAX`, and the cleaned signal is scaled with
//! the same factor and clamped on the way back to integers.

use crate::error::{DspError, DspResult};

/// Scale all channels so the loudest sample reaches `i16::MAX`.
///
/// Returns the original peak for the later conversion back to `i16`.
pub fn normalize_audio(channels: &mut [Vec<f64>]) -> DspResult<f64> {
    let peak = channels
        .iter()
        .flat_map(|channel| channel.iter())
        .fold(0.0f64, |acc, &sample| acc.max(sample.abs()));

    if peak == 0.0 {
        return Err(DspError::SilentInput);
    }

    let gain = i16::MAX as f64 / peak;
    for channel in channels.iter_mut() {
        for sample in channel.iter_mut() {
            *sample *= gain;
        }
    }

    Ok(peak)
}

/// Convert a processed channel back to 16-bit integers.
///
/// Samples are rescaled by `i16::MAX / peak`, rounded and clamped to the
/// `i16` range. Saturation is not an error, it is the documented behavior
/// for input that did not start at full scale.
pub fn scale_and_clamp(samples: &[f64], peak: f64) -> Vec<i16> {
    let scale = if peak > 0.0 {
        i16::MAX as f64 / peak
    } else {
        1.0
    };

    samples
        .iter()
        .map(|&sample| {
            (sample * scale)
                .round()
                .clamp(i16::MIN as f64, i16::MAX as f64) as i16
        })
        .collect()
}
