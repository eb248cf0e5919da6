//! quell-file: WAV boundary codec
//!
//! A thin adapter between WAV containers and the channel-major sample
//! matrix the engine works on. Only 16-bit integer PCM passes through;
//! everything else is rejected here so the core never sees it.

mod error;
mod wav;

pub use error::{FileError, FileResult};
pub use wav::WavFile;
