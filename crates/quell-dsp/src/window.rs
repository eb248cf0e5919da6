//! Hamming window primitives

use std::f64::consts::PI;

/// Generate a Hamming window table of the given size.
///
/// `w[n] = 0.54 - 0.46 * cos(2*pi*n / (N-1))`
pub fn hamming_window(size: usize) -> Vec<f64> {
    const COEFFICIENT: f64 = 0.54;

    (0..size)
        .map(|n| {
            COEFFICIENT - (1.0 - COEFFICIENT) * ((2.0 * PI * n as f64) / (size - 1) as f64).cos()
        })
        .collect()
}

/// Apply a Hamming window to every frame in place.
///
/// All frames are expected to share the length of the first one.
pub fn apply_hamming_window(frames: &mut [Vec<f64>]) {
    let Some(first) = frames.first() else {
        return;
    };
    let window = hamming_window(first.len());

    for frame in frames.iter_mut() {
        for (sample, weight) in frame.iter_mut().zip(&window) {
            *sample *= weight;
        }
    }
}
