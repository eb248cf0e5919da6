//! Error types for the DSP core

use thiserror::Error;

/// DSP processing errors
#[derive(Error, Debug)]
pub enum DspError {
    /// Peak amplitude is zero; normalization is undefined
    #[error("input is silent, peak amplitude is zero")]
    SilentInput,

    /// Channel shorter than a single analysis frame
    #[error("channel too short: {len} samples, need at least {frame_size}")]
    TooShort { len: usize, frame_size: usize },

    /// Overlap ratio outside `[0, 1)`
    #[error("invalid overlap ratio {0}, must be in [0, 1)")]
    InvalidOverlap(f64),

    /// Overlap-add hit a zero window-weight sum
    #[error("overlap-add weight sum is zero at sample {0}")]
    ReconstructionDegenerate(usize),

    /// FFT plan execution reported failure
    #[error("FFT failure: {0}")]
    FftFailure(String),
}

/// Result type for DSP operations
pub type DspResult<T> = Result<T, DspError>;

impl From<realfft::FftError> for DspError {
    fn from(err: realfft::FftError) -> Self {
        DspError::FftFailure(err.to_string())
    }
}
