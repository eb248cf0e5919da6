//! Parallel audio processor
//!
//! Owns the worker pool and the FFT plan pair. Plans are built once here,
//! at construction, and only ever executed afterwards; workers share them
//! read-only and bring their own scratch buffers.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use quell_dsp::DspError;
use quell_dsp::fft::FftPlans;
use quell_dsp::framing::{DEFAULT_OVERLAP_RATIO, frame_slice, overlap_add};
use quell_dsp::noise::estimate_noise_profile;
use quell_dsp::normalize::{normalize_audio, scale_and_clamp};
use quell_dsp::subtract::spectral_subtraction;
use quell_dsp::window::apply_hamming_window;

use crate::error::{EngineError, EngineResult};

/// Analysis frame size in samples. Fixed for the whole pipeline.
pub const FRAME_SIZE: usize = 1024;

// ═══════════════════════════════════════════════════════════════════════════════
// OPTIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// Processor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorOptions {
    /// Worker pool size
    pub num_threads: usize,
    /// Frames per parallel chunk task
    pub frame_chunking_size: usize,
    /// Leading frames averaged into the noise profile
    pub num_noise_frames: usize,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            num_threads: num_cpus::get(),
            frame_chunking_size: 32,
            num_noise_frames: 50,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PROCESSOR
// ═══════════════════════════════════════════════════════════════════════════════

/// Multi-channel spectral noise reducer backed by a fixed-size thread pool.
pub struct ParallelProcessor {
    pool: rayon::ThreadPool,
    plans: FftPlans,
    options: ProcessorOptions,
}

impl ParallelProcessor {
    /// Build the worker pool and the FFT plans.
    pub fn new(options: ProcessorOptions) -> EngineResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.num_threads)
            .build()
            .map_err(|e| EngineError::WorkerFailure(e.to_string()))?;

        Ok(Self {
            pool,
            plans: FftPlans::new(FRAME_SIZE),
            options,
        })
    }

    /// Denoise a channel-major block of 16-bit samples.
    ///
    /// Every channel must be at least one frame long. The output keeps the
    /// channel order; per channel, tail samples past the last full frame
    /// are dropped and every chunk boundary re-emits the overlapped hop,
    /// so the length is `hop * (F - 1) + FRAME_SIZE + hop * (chunks - 1)`.
    pub fn process_audio(&self, samples: &[Vec<i16>]) -> EngineResult<Vec<Vec<i16>>> {
        let mut channels: Vec<Vec<f64>> = samples
            .iter()
            .map(|channel| channel.iter().map(|&s| s as f64).collect())
            .collect();

        let peak = normalize_audio(&mut channels)?;
        log::debug!("normalized {} channels, peak {}", channels.len(), peak);

        // Framing is memory-bound; threading it is not worth the overhead.
        let mut channel_frames = Vec::with_capacity(channels.len());
        for channel in &channels {
            let mut frames = frame_slice(channel, FRAME_SIZE, DEFAULT_OVERLAP_RATIO)?;
            apply_hamming_window(&mut frames);
            channel_frames.push(frames);
        }
        drop(channels);

        let profiles = self.noise_profiles(&channel_frames)?;
        let cleaned = self.process_channels_chunked(&channel_frames, &profiles)?;

        Ok(cleaned
            .iter()
            .map(|channel| scale_and_clamp(channel, peak))
            .collect())
    }

    /// Phase A: one task per channel, collected in channel order.
    fn noise_profiles(&self, channel_frames: &[Vec<Vec<f64>>]) -> EngineResult<Vec<Vec<f64>>> {
        let num_noise_frames = self.options.num_noise_frames;
        let plans = &self.plans;

        let profiles: Result<Vec<Vec<f64>>, DspError> = self.pool.install(|| {
            channel_frames
                .par_iter()
                .map(|frames| estimate_noise_profile(frames, num_noise_frames, plans))
                .collect()
        });

        Ok(profiles?)
    }

    /// Phase B: split every channel into frame chunks and hand the whole
    /// job list to the pool at once, so no channel serializes behind
    /// another. Each chunk is subtracted and overlap-added on its own and
    /// the partial signals are concatenated back in frame order.
    fn process_channels_chunked(
        &self,
        channel_frames: &[Vec<Vec<f64>>],
        profiles: &[Vec<f64>],
    ) -> EngineResult<Vec<Vec<f64>>> {
        let chunk_size = self.options.frame_chunking_size.max(1);

        let mut jobs = Vec::new();
        for (channel_idx, frames) in channel_frames.iter().enumerate() {
            let mut start = 0;
            while start < frames.len() {
                let end = (start + chunk_size).min(frames.len());
                jobs.push((channel_idx, start, end));
                start = end;
            }
        }
        log::debug!(
            "submitting {} chunk tasks across {} channels",
            jobs.len(),
            channel_frames.len()
        );

        let plans = &self.plans;
        let chunks: Result<Vec<Vec<f64>>, DspError> = self.pool.install(|| {
            jobs.par_iter()
                .map(|&(channel_idx, start, end)| {
                    let frames = &channel_frames[channel_idx][start..end];
                    let cleaned = spectral_subtraction(frames, &profiles[channel_idx], plans)?;
                    overlap_add(&cleaned, FRAME_SIZE, DEFAULT_OVERLAP_RATIO)
                })
                .collect()
        });
        let chunks = chunks?;

        // Jobs were emitted channel-major in frame order and par_iter
        // preserves that order on collect, so a flat append rebuilds every
        // channel correctly.
        let mut output = vec![Vec::new(); channel_frames.len()];
        for (&(channel_idx, _, _), chunk) in jobs.iter().zip(chunks) {
            output[channel_idx].extend(chunk);
        }

        Ok(output)
    }
}
