//! Offline processing of whole files through the equalizer.

use trieq_core::ProcessSpec;
use trieq_eq::{EqParams, ThreeBandEq};

use crate::PlanarSamples;

/// Block size used when none is configured.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Runs a [`ThreeBandEq`] over planar buffers in fixed-size blocks.
///
/// Each call to [`process`](Self::process) re-prepares the chain for the
/// buffer's sample rate and channel count, so one engine can process files
/// of different formats in turn. Filter state starts from zero per file.
pub struct ProcessingEngine {
    eq: ThreeBandEq,
    block_size: usize,
}

impl ProcessingEngine {
    /// Create a new processing engine. A zero block size is raised to one.
    pub fn new(params: EqParams, block_size: usize) -> Self {
        Self {
            eq: ThreeBandEq::with_params(params),
            block_size: block_size.max(1),
        }
    }

    /// Block size in frames.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// The underlying chain.
    pub fn eq(&self) -> &ThreeBandEq {
        &self.eq
    }

    /// Current parameters.
    pub fn params(&self) -> &EqParams {
        self.eq.params()
    }

    /// Replace the parameters used for subsequent blocks.
    pub fn set_params(&mut self, params: &EqParams) {
        self.eq.update_from_parameters(params);
    }

    /// Enable or disable the chain's output sanitizer.
    pub fn set_sanitize_output(&mut self, enabled: bool) {
        self.eq.set_sanitize_output(enabled);
    }

    /// Filter every channel of `samples` in place.
    pub fn process(&mut self, samples: &mut PlanarSamples, sample_rate: f32) {
        self.process_with_progress(samples, sample_rate, |_, _| {});
    }

    /// Like [`process`](Self::process), calling `progress(frames_done, total)`
    /// after every block.
    pub fn process_with_progress<F>(
        &mut self,
        samples: &mut PlanarSamples,
        sample_rate: f32,
        mut progress: F,
    ) where
        F: FnMut(usize, usize),
    {
        let total = samples.len();
        let num_channels = samples.num_channels();
        self.eq.prepare(ProcessSpec::new(
            sample_rate,
            self.block_size,
            num_channels,
        ));
        tracing::info!(
            sample_rate,
            channels = num_channels,
            frames = total,
            block_size = self.block_size,
            "processing"
        );

        let mut start = 0;
        while start < total {
            let end = (start + self.block_size).min(total);
            let mut block: Vec<&mut [f32]> = samples
                .channels_mut()
                .iter_mut()
                .map(|channel| &mut channel[start..end])
                .collect();
            self.eq.process(&mut block);
            start = end;
            progress(start, total);
        }

        self.eq.release();
    }
}

impl Default for ProcessingEngine {
    fn default() -> Self {
        Self::new(EqParams::default(), DEFAULT_BLOCK_SIZE)
    }
}
