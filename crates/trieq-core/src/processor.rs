//! The [`Processor`] lifecycle trait and its [`ProcessSpec`].
//!
//! A processor moves through two states:
//!
//! ```text
//! Unprepared --prepare--> Ready --process / parameter updates--> Ready
//!     ^                     |  \--reset--> Ready (state zeroed)
//!     +------release--------+
//! ```
//!
//! `prepare` is the only place a processor may allocate. `process` runs on
//! the real-time thread and must never lock, allocate, or block.

/// Playback configuration handed to [`Processor::prepare`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    /// Sample rate in Hz.
    pub sample_rate: f32,
    /// Largest block `process` will ever be called with, in samples per channel.
    pub max_block_size: usize,
    /// Number of channels the processor keeps state for.
    pub num_channels: usize,
}

impl ProcessSpec {
    /// Creates a spec.
    pub const fn new(sample_rate: f32, max_block_size: usize, num_channels: usize) -> Self {
        Self {
            sample_rate,
            max_block_size,
            num_channels,
        }
    }
}

impl Default for ProcessSpec {
    /// 48 kHz stereo, 512-sample blocks.
    fn default() -> Self {
        Self::new(48000.0, 512, 2)
    }
}

/// Multichannel, in-place block processor with an explicit lifecycle.
///
/// Blocks are planar: `block[channel][sample]`. Every channel slice in one
/// call has the same length.
///
/// # Example
///
/// ```rust
/// use trieq_core::{ProcessSpec, Processor};
///
/// #[derive(Default)]
/// struct Invert {
///     ready: bool,
/// }
///
/// impl Processor for Invert {
///     fn prepare(&mut self, _spec: ProcessSpec) {
///         self.ready = true;
///     }
///
///     fn process(&mut self, block: &mut [&mut [f32]]) {
///         if !self.ready {
///             return;
///         }
///         for channel in block.iter_mut() {
///             for sample in channel.iter_mut() {
///                 *sample = -*sample;
///             }
///         }
///     }
///
///     fn reset(&mut self) {}
///
///     fn release(&mut self) {
///         self.ready = false;
///     }
///
///     fn is_prepared(&self) -> bool {
///         self.ready
///     }
/// }
///
/// let mut p = Invert::default();
/// p.prepare(ProcessSpec::default());
/// let mut left = [0.5_f32, -0.25];
/// p.process(&mut [&mut left[..]]);
/// assert_eq!(left, [-0.5, 0.25]);
/// ```
pub trait Processor {
    /// Allocate per-channel state, zero it, and derive sample-rate-dependent
    /// values. Call again whenever the sample rate or channel count changes.
    fn prepare(&mut self, spec: ProcessSpec);

    /// Filter `block` in place.
    ///
    /// Calling this before `prepare` is a programming error; implementations
    /// assert in debug builds and leave the block untouched otherwise.
    fn process(&mut self, block: &mut [&mut [f32]]);

    /// Zero all internal state without changing parameters.
    fn reset(&mut self);

    /// Drop per-channel state and return to the unprepared state.
    fn release(&mut self);

    /// Returns `true` between `prepare` and `release`.
    fn is_prepared(&self) -> bool;

    /// Processing latency in samples. IIR processors report zero.
    fn latency_samples(&self) -> usize {
        0
    }
}
