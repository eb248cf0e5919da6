//! Frame slicing and overlap-add reconstruction
//!
//! A channel is cut into frames of `frame_size` samples that overlap by
//! `floor(frame_size * overlap_ratio)`. Reconstruction adds the frames back
//! at their original offsets and divides every output sample by the sum of
//! the Hamming window weights that covered it.

use crate::error::{DspError, DspResult};
use crate::window::hamming_window;

/// Default analysis overlap: 50%, i.e. a hop of half a frame.
pub const DEFAULT_OVERLAP_RATIO: f64 = 0.5;

/// Cut a channel into overlapping frames.
///
/// Emits frames at offsets `0, hop, 2*hop, ...` while a full frame fits.
/// Tail samples that do not fill a frame are dropped; the caller sees the
/// loss as a shorter reconstructed output.
pub fn frame_slice(
    samples: &[f64],
    frame_size: usize,
    overlap_ratio: f64,
) -> DspResult<Vec<Vec<f64>>> {
    if !(0.0..1.0).contains(&overlap_ratio) {
        return Err(DspError::InvalidOverlap(overlap_ratio));
    }
    if samples.len() < frame_size {
        return Err(DspError::TooShort {
            len: samples.len(),
            frame_size,
        });
    }

    let overlap = (frame_size as f64 * overlap_ratio) as usize;
    let hop = frame_size - overlap;
    let num_frames = (samples.len() - overlap) / hop;

    let mut frames = Vec::with_capacity(num_frames);
    for i in 0..num_frames {
        let start = i * hop;
        frames.push(samples[start..start + frame_size].to_vec());
    }

    Ok(frames)
}

/// Reconstruct a signal from overlapping frames.
///
/// Output length is `hop * (F - 1) + frame_size`. Every output sample is
/// divided by the summed Hamming weights that landed on it; with the 0.54
/// coefficient and 50% overlap that sum is strictly positive everywhere,
/// so a zero weight is an invariant violation, not a rounding case.
pub fn overlap_add(
    frames: &[Vec<f64>],
    frame_size: usize,
    overlap_ratio: f64,
) -> DspResult<Vec<f64>> {
    if !(0.0..1.0).contains(&overlap_ratio) {
        return Err(DspError::InvalidOverlap(overlap_ratio));
    }
    if frames.is_empty() {
        return Ok(Vec::new());
    }

    let overlap = (frame_size as f64 * overlap_ratio) as usize;
    let hop = frame_size - overlap;
    let output_size = hop * (frames.len() - 1) + frame_size;

    let mut output = vec![0.0; output_size];
    let mut weight_sum = vec![0.0; output_size];
    let window = hamming_window(frame_size);

    for (i, frame) in frames.iter().enumerate() {
        let offset = i * hop;
        for (j, (&sample, &weight)) in frame.iter().zip(&window).enumerate() {
            output[offset + j] += sample;
            weight_sum[offset + j] += weight;
        }
    }

    for (i, (sample, &weight)) in output.iter_mut().zip(&weight_sum).enumerate() {
        if weight <= 0.0 {
            return Err(DspError::ReconstructionDegenerate(i));
        }
        *sample /= weight;
    }

    Ok(output)
}
