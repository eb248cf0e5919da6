//! Engine integration tests
//!
//! End-to-end runs of the full pipeline. Verifies:
//! - Channel count and order preservation
//! - Output length arithmetic (framing tail loss + chunk seams)
//! - Full-scale signal fidelity with an empty noise profile
//! - Noise suppression against a learned profile
//! - SNR improvement on sine + broadband noise
//! - Determinism across worker pool sizes

use quell_engine::{EngineError, FRAME_SIZE, ParallelProcessor, ProcessorOptions};

const SAMPLE_RATE: f64 = 44100.0;
const HOP: usize = FRAME_SIZE / 2;

fn options(num_threads: usize, num_noise_frames: usize) -> ProcessorOptions {
    ProcessorOptions {
        num_threads,
        frame_chunking_size: 32,
        num_noise_frames,
    }
}

/// Generate a sine wave in f64, amplitude 1.0
fn generate_sine(samples: usize, freq: f64) -> Vec<f64> {
    (0..samples)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE;
            (2.0 * std::f64::consts::PI * freq * t).sin()
        })
        .collect()
}

/// Deterministic white-ish noise in [-1, 1]
fn generate_noise(samples: usize, seed: u64) -> Vec<f64> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    (0..samples)
        .map(|i| {
            let mut hasher = DefaultHasher::new();
            (seed, i).hash(&mut hasher);
            let h = hasher.finish();
            (h as f64 / u64::MAX as f64) * 2.0 - 1.0
        })
        .collect()
}

/// Scale a float signal so its peak hits i16::MAX exactly, then quantize.
///
/// A full-scale peak makes the engine's normalize/denormalize round trip a
/// unit gain, which keeps amplitude assertions meaningful.
fn quantize_full_scale(signal: &[f64]) -> Vec<i16> {
    let peak = signal.iter().fold(0.0f64, |acc, &s| acc.max(s.abs()));
    assert!(peak > 0.0);
    let gain = i16::MAX as f64 / peak;
    signal
        .iter()
        .map(|&s| (s * gain).round().clamp(i16::MIN as f64, i16::MAX as f64) as i16)
        .collect()
}

fn rms_i16(signal: &[i16]) -> f64 {
    let sum: f64 = signal.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum / signal.len() as f64).sqrt()
}

fn num_frames(len: usize) -> usize {
    (len - HOP) / HOP
}

/// Chunked output length: every chunk emits hop*(chunk_len-1)+frame_size,
/// so each seam repeats `overlap` samples.
fn expected_output_len(input_len: usize, chunk_size: usize) -> usize {
    let frames = num_frames(input_len);
    let chunks = frames.div_ceil(chunk_size);
    HOP * (frames - 1) + FRAME_SIZE + HOP * (chunks - 1)
}

// ═══════════════════════════════════════════════════════════════════════════════
// SHAPE AND ERROR SCENARIOS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn silence_reports_silent_input() {
    let processor = ParallelProcessor::new(options(2, 50)).unwrap();
    let silence = vec![vec![0i16; 44100]];

    match processor.process_audio(&silence) {
        Err(EngineError::Dsp(quell_dsp::DspError::SilentInput)) => {}
        other => panic!("expected SilentInput, got {other:?}"),
    }
}

#[test]
fn channel_count_and_length_are_preserved() {
    let processor = ParallelProcessor::new(options(4, 50)).unwrap();
    let input: Vec<Vec<i16>> = (0..3)
        .map(|ch| quantize_full_scale(&generate_sine(44100, 500.0 * (ch + 1) as f64)))
        .collect();

    let output = processor.process_audio(&input).unwrap();

    assert_eq!(output.len(), 3);
    let expected = expected_output_len(44100, 32);
    for channel in &output {
        assert_eq!(channel.len(), expected);
    }
}

#[test]
fn single_frame_stereo_produces_one_frame_per_channel() {
    let processor = ParallelProcessor::new(options(2, 5)).unwrap();
    let left = quantize_full_scale(&generate_sine(FRAME_SIZE, 1000.0));
    let right: Vec<i16> = left.iter().map(|&s| s / 2).collect();

    let output = processor.process_audio(&[left, right]).unwrap();

    assert_eq!(output.len(), 2);
    assert_eq!(output[0].len(), FRAME_SIZE);
    assert_eq!(output[1].len(), FRAME_SIZE);

    // Order preserved: the attenuated copy stays on the right
    let left_peak = output[0].iter().map(|&s| (s as i32).abs()).max().unwrap();
    let right_peak = output[1].iter().map(|&s| (s as i32).abs()).max().unwrap();
    assert!(
        left_peak > right_peak,
        "left {left_peak} should out-peak right {right_peak}"
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// SIGNAL QUALITY SCENARIOS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn full_scale_sine_survives_with_no_noise_frames() {
    // num_noise_frames = 0 leaves the profile empty, so the pipeline
    // reduces to frame/window/FFT round trips and reconstruction.
    let processor = ParallelProcessor::new(options(4, 0)).unwrap();
    let input = vec![quantize_full_scale(&generate_sine(44100, 1000.0))];

    let output = processor.process_audio(&input).unwrap();

    let in_rms = rms_i16(&input[0][..40000]);
    let out_rms = rms_i16(&output[0][..40000]);
    assert!(
        (out_rms - in_rms).abs() / in_rms < 0.05,
        "RMS drifted: in {in_rms}, out {out_rms}"
    );

    // No DC offset creeps in
    let mean: f64 = output[0].iter().map(|&s| s as f64).sum::<f64>() / output[0].len() as f64;
    assert!(mean.abs() < 10.0, "DC offset {mean}");
}

#[test]
fn periodic_noise_is_subtracted_almost_entirely() {
    // A hop-periodic signal makes every windowed frame identical, so the
    // learned profile matches each frame's spectrum exactly and the
    // zero-floor removes essentially all energy.
    let signal: Vec<f64> = (0..2048)
        .map(|i| {
            let t = i as f64 / HOP as f64;
            (2.0 * std::f64::consts::PI * 3.0 * t).sin()
                + 0.6 * (2.0 * std::f64::consts::PI * 17.0 * t).sin()
                + 0.3 * (2.0 * std::f64::consts::PI * 41.0 * t).cos()
        })
        .collect();
    let input = vec![quantize_full_scale(&signal)];

    let processor = ParallelProcessor::new(options(2, 5)).unwrap();
    let output = processor.process_audio(&input).unwrap();

    let in_rms = rms_i16(&input[0]);
    let out_rms = rms_i16(&output[0]);
    assert!(
        out_rms < 0.05 * in_rms,
        "residual {out_rms} vs input {in_rms}"
    );
}

#[test]
fn snr_improves_on_sine_with_noise_lead_in() {
    // First 50 frames (samples 0..26112) are noise only; the tone starts
    // right at the frame boundary. Default profile length = 50 frames.
    const TONE_START: usize = 26112;
    const LEN: usize = 44100;

    let noise = generate_noise(LEN, 11);
    let mut signal: Vec<f64> = noise.iter().map(|&n| 0.1 * n).collect();
    let tone = generate_sine(LEN, 1000.0);
    for i in TONE_START..LEN {
        signal[i] += 0.5 * tone[i];
    }
    let input = vec![quantize_full_scale(&signal)];

    let processor = ParallelProcessor::new(options(4, 50)).unwrap();
    let output = processor.process_audio(&input).unwrap();

    // Chunk layout for 85 frames: [0,32) [32,64) [64,85), so output indices
    // shift by one hop per seam. Measure the noise floor inside the first
    // chunk (aligned 1:1 with the input) and the tone inside the third.
    let noise_in = rms_i16(&input[0][2048..16000]);
    let noise_out = rms_i16(&output[0][2048..16000]);
    let sig_in = rms_i16(&input[0][34000..43000]);
    let sig_out = rms_i16(&output[0][34000 + 2 * HOP..43000 + 2 * HOP]);

    assert!(
        noise_out < 0.5 * noise_in,
        "noise floor only dropped from {noise_in} to {noise_out}"
    );
    assert!(
        (sig_out - sig_in).abs() / sig_in < 0.2,
        "tone level moved from {sig_in} to {sig_out}"
    );

    let improvement = (sig_out / noise_out) / (sig_in / noise_in);
    assert!(
        improvement >= 2.0,
        "SNR improvement {improvement:.2}x is below 6 dB"
    );
}

#[test]
fn stereo_channels_are_processed_independently() {
    const LEN: usize = 22050;

    let mut left_signal = generate_sine(LEN, 880.0);
    let left_noise = generate_noise(LEN, 3);
    for (s, n) in left_signal.iter_mut().zip(&left_noise) {
        *s = 0.6 * *s + 0.1 * n;
    }
    let right_signal = generate_noise(LEN, 4);

    let left = quantize_full_scale(&left_signal);
    let right = quantize_full_scale(&right_signal);

    let processor = ParallelProcessor::new(options(4, 20)).unwrap();
    let stereo = processor
        .process_audio(&[left.clone(), right.clone()])
        .unwrap();
    let left_alone = processor.process_audio(&[left]).unwrap();
    let right_alone = processor.process_audio(&[right]).unwrap();

    assert_eq!(stereo.len(), 2);
    assert_eq!(stereo[0].len(), stereo[1].len());

    // Both inputs are quantized to the same full-scale peak, so the global
    // normalization matches the per-channel runs and each stereo channel
    // must equal its solo rendition bit for bit.
    assert_eq!(stereo[0], left_alone[0]);
    assert_eq!(stereo[1], right_alone[0]);
}

// ═══════════════════════════════════════════════════════════════════════════════
// DETERMINISM
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn output_is_identical_across_pool_sizes() {
    const LEN: usize = 44100;

    let noise = generate_noise(LEN, 99);
    let tone = generate_sine(LEN, 440.0);
    let signal: Vec<f64> = tone
        .iter()
        .zip(&noise)
        .map(|(&s, &n)| 0.7 * s + 0.15 * n)
        .collect();
    let input = vec![
        quantize_full_scale(&signal),
        quantize_full_scale(&noise),
    ];

    let single = ParallelProcessor::new(options(1, 50)).unwrap();
    let pooled = ParallelProcessor::new(options(8, 50)).unwrap();

    let out_single = single.process_audio(&input).unwrap();
    let out_pooled = pooled.process_audio(&input).unwrap();

    assert_eq!(out_single, out_pooled);
}
