//! Spectral subtraction
//!
//! The classical recipe: attenuate each bin's magnitude by the noise
//! profile, keep the original phase, and resynthesize. Negative magnitudes
//! are clamped to zero rather than floored, trading a little musical noise
//! for simplicity.

use crate::error::DspResult;
use crate::fft::FftPlans;

/// Subtract the noise profile from every frame's magnitude spectrum.
///
/// Returns one cleaned frame per input frame, already scaled down by the
/// frame size to undo the unnormalized backward transform.
pub fn spectral_subtraction(
    frames: &[Vec<f64>],
    noise_profile: &[f64],
    plans: &FftPlans,
) -> DspResult<Vec<Vec<f64>>> {
    let mut cleaned = Vec::with_capacity(frames.len());

    let mut scratch = plans.make_scratch();
    let num_bins = plans.num_bins();
    let norm = 1.0 / plans.frame_size() as f64;

    for frame in frames {
        scratch.time.copy_from_slice(frame);
        plans.execute_forward(&mut scratch)?;

        for (bin, &noise_mag) in scratch.spectrum.iter_mut().zip(noise_profile) {
            let mag = bin.re.hypot(bin.im);
            let phase = bin.im.atan2(bin.re);

            let subtracted_mag = (mag - noise_mag).max(0.0);

            bin.re = subtracted_mag * phase.cos();
            bin.im = subtracted_mag * phase.sin();
        }

        // The DC bin (and for even sizes the Nyquist bin) of a real
        // spectrum is purely real; clear the sin() round-off so the
        // backward plan accepts it.
        scratch.spectrum[0].im = 0.0;
        if plans.frame_size() % 2 == 0 {
            scratch.spectrum[num_bins - 1].im = 0.0;
        }

        plans.execute_backward(&mut scratch)?;

        for sample in &mut scratch.time {
            *sample *= norm;
        }

        cleaned.push(scratch.time.clone());
    }

    Ok(cleaned)
}
