//! Quell - parallel noise reduction for WAV files
//!
//! Command-line entry point: decode, denoise, encode.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use quell_engine::{ParallelProcessor, ProcessorOptions};
use quell_file::WavFile;

#[derive(Parser, Debug)]
#[command(version, about = "Parallel spectral noise reduction for 16-bit PCM WAV files")]
struct Args {
    /// File to process
    input: PathBuf,

    /// Denoised output file
    output: PathBuf,

    /// Number of worker threads. Default is the hardware parallelism.
    #[arg(long)]
    threads: Option<usize>,

    /// Number of leading frames treated as noise when estimating the
    /// noise spectrum
    #[arg(long, default_value_t = 50)]
    noise_frames: usize,

    /// Frames per parallel task
    #[arg(long, default_value_t = 32)]
    chunk_size: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !args.input.exists() {
        bail!("input file {} does not exist", args.input.display());
    }

    log::info!("loading {}", args.input.display());
    let mut wav = WavFile::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let spec = wav.spec();
    log::info!(
        "{} Hz, {} channel(s), {} samples per channel",
        spec.sample_rate,
        spec.channels,
        wav.channels().first().map_or(0, Vec::len)
    );

    let options = ProcessorOptions {
        num_threads: args.threads.unwrap_or_else(num_cpus::get),
        frame_chunking_size: args.chunk_size,
        num_noise_frames: args.noise_frames,
    };
    log::info!(
        "processing with {} threads, {} noise frames, chunks of {} frames",
        options.num_threads,
        options.num_noise_frames,
        options.frame_chunking_size
    );

    let processor = ParallelProcessor::new(options)?;
    let cleaned = processor
        .process_audio(wav.channels())
        .context("noise reduction failed")?;

    wav.set_channels(cleaned)?;
    wav.write(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    log::info!("wrote {}", args.output.display());
    Ok(())
}
