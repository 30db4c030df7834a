//! Audio file I/O and offline processing for trieq.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] load and save every
//!   channel of a file as planar [`PlanarSamples`]
//! - **Offline processing**: [`ProcessingEngine`] runs a [`ThreeBandEq`]
//!   over a whole file in fixed-size blocks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trieq_eq::EqParams;
//! use trieq_io::{ProcessingEngine, read_wav, write_wav};
//!
//! let (mut samples, spec) = read_wav("input.wav")?;
//!
//! let mut engine = ProcessingEngine::new(EqParams { low_gain: 3.0, ..EqParams::default() }, 512);
//! engine.process(&mut samples, spec.sample_rate as f32);
//!
//! write_wav("output.wav", &samples, spec)?;
//! ```
//!
//! [`ThreeBandEq`]: trieq_eq::ThreeBandEq

mod engine;
mod wav;

pub use engine::{DEFAULT_BLOCK_SIZE, ProcessingEngine};
pub use wav::{
    PlanarSamples, SUPPORTED_BIT_DEPTHS, WavFormat, WavInfo, WavSpec, read_wav, read_wav_info,
    write_wav,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The spec's channel count does not match the samples being written.
    #[error("Channel count mismatch: spec has {expected}, samples have {found}")]
    ChannelMismatch {
        /// Channels declared in the spec.
        expected: usize,
        /// Channels present in the samples.
        found: usize,
    },

    /// Channels of one buffer have different lengths.
    #[error("Channels have different lengths")]
    RaggedChannels,

    /// The requested bit depth cannot be written.
    #[error("Unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
