//! quell-dsp: spectral subtraction primitives
//!
//! The building blocks of the Quell noise reduction pipeline:
//!
//! - `window` - Hamming window table and per-frame application
//! - `framing` - frame slicing and weighted overlap-add reconstruction
//! - `fft` - shared FFT plans with per-task scratch buffers
//! - `noise` - noise profile estimation from leading frames
//! - `subtract` - magnitude subtraction with phase preservation
//! - `normalize` - peak normalization to 16-bit range and back
//!
//! Everything here is single-threaded and allocation-light; the parallel
//! orchestration lives in `quell-engine`.

pub mod fft;
pub mod framing;
pub mod noise;
pub mod normalize;
pub mod subtract;
pub mod window;

mod error;

pub use error::{DspError, DspResult};
