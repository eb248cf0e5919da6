//! Error types for the processing engine

use quell_dsp::DspError;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// A DSP stage failed; the whole call aborts
    #[error(transparent)]
    Dsp(#[from] DspError),

    /// The worker pool could not be built or a worker faulted
    #[error("worker failure: {0}")]
    WorkerFailure(String),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
