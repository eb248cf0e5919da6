//! Noise profile estimation
//!
//! The profile is the per-bin mean magnitude spectrum of the leading frames
//! of a channel, which the caller asserts contain only noise.

use crate::error::DspResult;
use crate::fft::FftPlans;

/// Average the magnitude spectra of the first `num_noise_frames` frames.
///
/// When fewer frames exist than requested, the average is taken over the
/// frames actually seen. An empty frame set yields an all-zero profile.
pub fn estimate_noise_profile(
    frames: &[Vec<f64>],
    num_noise_frames: usize,
    plans: &FftPlans,
) -> DspResult<Vec<f64>> {
    let mut profile = vec![0.0; plans.num_bins()];

    let count = num_noise_frames.min(frames.len());
    if count == 0 {
        return Ok(profile);
    }

    let mut scratch = plans.make_scratch();
    for frame in &frames[..count] {
        scratch.time.copy_from_slice(frame);
        plans.execute_forward(&mut scratch)?;

        for (bin, c) in profile.iter_mut().zip(&scratch.spectrum) {
            // hypot avoids intermediate overflow on loud bins
            *bin += c.re.hypot(c.im);
        }
    }

    for bin in &mut profile {
        *bin /= count as f64;
    }

    Ok(profile)
}
