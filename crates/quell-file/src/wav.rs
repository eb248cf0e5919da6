//! WAV reading and writing
//!
//! Samples are stored channel-major (`samples[channel][index]`), matching
//! what the engine consumes. The original `WavSpec` is kept so the output
//! container preserves sample rate, channel count and bit depth.

use std::path::Path;

use crate::error::{FileError, FileResult};

/// A 16-bit PCM WAV file held fully in memory.
pub struct WavFile {
    spec: hound::WavSpec,
    samples: Vec<Vec<i16>>,
}

impl WavFile {
    /// Read and validate a 16-bit integer PCM WAV file.
    pub fn read<P: AsRef<Path>>(path: P) -> FileResult<Self> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();

        if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(FileError::UnsupportedFormat(format!(
                "only 16-bit integer PCM is supported, got {}-bit {:?}",
                spec.bits_per_sample, spec.sample_format
            )));
        }
        if spec.channels == 0 {
            return Err(FileError::InvalidFile("zero channels".into()));
        }

        let channels = spec.channels as usize;
        let interleaved: Vec<i16> = reader
            .samples::<i16>()
            .collect::<Result<_, hound::Error>>()?;

        // Drop a trailing partial frame so every channel has equal length.
        let frames = interleaved.len() / channels;
        let mut samples = vec![Vec::with_capacity(frames); channels];
        for (i, sample) in interleaved.into_iter().take(frames * channels).enumerate() {
            samples[i % channels].push(sample);
        }

        Ok(Self { spec, samples })
    }

    /// Container spec of the source file.
    pub fn spec(&self) -> hound::WavSpec {
        self.spec
    }

    /// Channel-major sample data.
    pub fn channels(&self) -> &[Vec<i16>] {
        &self.samples
    }

    /// Replace the sample data, keeping the container spec.
    ///
    /// The channel count must match the spec; a different length is fine
    /// (processing trims the tail to a frame boundary).
    pub fn set_channels(&mut self, new_samples: Vec<Vec<i16>>) -> FileResult<()> {
        if new_samples.len() != self.spec.channels as usize {
            return Err(FileError::InvalidFile(format!(
                "expected {} channels, got {}",
                self.spec.channels,
                new_samples.len()
            )));
        }
        let len = new_samples.first().map_or(0, Vec::len);
        if new_samples.iter().any(|channel| channel.len() != len) {
            return Err(FileError::InvalidFile(
                "channels have unequal lengths".into(),
            ));
        }

        self.samples = new_samples;
        Ok(())
    }

    /// Write the samples with the original spec.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> FileResult<()> {
        let mut writer = hound::WavWriter::create(path, self.spec)?;

        let frames = self.samples.first().map_or(0, Vec::len);
        for frame in 0..frames {
            for channel in &self.samples {
                writer.write_sample(channel[frame])?;
            }
        }

        writer.finalize()?;
        Ok(())
    }
}
