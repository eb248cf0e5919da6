//! quell-engine: parallel spectral noise reduction
//!
//! Drives the `quell-dsp` primitives across a fixed-size worker pool:
//!
//! ```text
//! SampleMatrix (i16)
//!   └─ cast to f64 ─ normalize ─ frame + window        (sequential)
//!        └─ Phase A: noise profile per channel         (parallel)
//!             └─ Phase B: chunked subtract + rebuild   (parallel)
//!                  └─ reassemble ─ scale + clamp ─ SampleMatrix (i16)
//! ```
//!
//! Phase A finishes before Phase B starts; within Phase B all chunks of
//! all channels are in flight at once and results are stitched back in
//! frame order, so output is bit-identical for any pool size.

mod error;
mod processor;

pub use error::{EngineError, EngineResult};
pub use processor::{FRAME_SIZE, ParallelProcessor, ProcessorOptions};
