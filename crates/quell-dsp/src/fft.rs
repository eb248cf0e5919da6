//! FFT plan lifecycle and execution
//!
//! One forward (real-to-complex) and one backward (complex-to-real) plan
//! are built per processor and shared read-only across worker threads.
//! Plan construction happens once, at setup; execution is stateless and
//! safe to invoke concurrently as long as every caller brings its own
//! buffers, which is what [`FftScratch`] is for.
//!
//! The backward transform is unnormalized: callers divide the output by
//! the frame size.

use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use rustfft::num_complex::Complex;
use std::sync::Arc;

use crate::error::DspResult;

/// Forward and backward FFT plans for a fixed frame size.
pub struct FftPlans {
    forward: Arc<dyn RealToComplex<f64>>,
    backward: Arc<dyn ComplexToReal<f64>>,
    frame_size: usize,
}

/// Per-task FFT buffers, owned exclusively by one worker.
pub struct FftScratch {
    /// Time-domain buffer, length `frame_size`. Input of the forward
    /// transform (consumed as scratch) and output of the backward one.
    pub time: Vec<f64>,
    /// Frequency-domain buffer, length `frame_size / 2 + 1`.
    pub spectrum: Vec<Complex<f64>>,
}

impl FftPlans {
    /// Build the plan pair for `frame_size`.
    pub fn new(frame_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        Self {
            forward: planner.plan_fft_forward(frame_size),
            backward: planner.plan_fft_inverse(frame_size),
            frame_size,
        }
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Number of complex bins in a spectrum: `frame_size / 2 + 1`.
    pub fn num_bins(&self) -> usize {
        self.frame_size / 2 + 1
    }

    /// Allocate a scratch pair sized for these plans.
    pub fn make_scratch(&self) -> FftScratch {
        FftScratch {
            time: vec![0.0; self.frame_size],
            spectrum: vec![Complex::new(0.0, 0.0); self.num_bins()],
        }
    }

    /// Forward transform `scratch.time` into `scratch.spectrum`.
    ///
    /// The time buffer is clobbered in the process.
    pub fn execute_forward(&self, scratch: &mut FftScratch) -> DspResult<()> {
        self.forward
            .process(&mut scratch.time, &mut scratch.spectrum)?;
        Ok(())
    }

    /// Backward transform `scratch.spectrum` into `scratch.time`,
    /// unnormalized. The spectrum buffer is clobbered in the process.
    pub fn execute_backward(&self, scratch: &mut FftScratch) -> DspResult<()> {
        self.backward
            .process(&mut scratch.spectrum, &mut scratch.time)?;
        Ok(())
    }
}
