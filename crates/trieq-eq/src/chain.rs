//! The three-band processing chain.

use trieq_core::{
    BiquadCoefficients, ParamDescriptor, ParameterInfo, ProcessSpec, Processor, flush_denormal,
    linear_to_db, sanitize,
};

use crate::band::{Band, BandRole};
use crate::params::{EqParams, PARAM_COUNT, descriptor};
use crate::shared::SharedParams;

/// Lifecycle state of a [`ThreeBandEq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    /// No channel state allocated; `process` does nothing.
    Unprepared,
    /// Prepared for a sample rate and channel count.
    Ready,
}

/// Three-band parametric equalizer: low shelf → peak → high shelf.
///
/// Each channel runs through its own filter state; all channels share one
/// coefficient set per band. Processing is in place and allocation-free.
///
/// Coefficients are recomputed by [`prepare`](Self::prepare),
/// [`update_from_parameters`](Self::update_from_parameters), and at the top of
/// every block when a parameter was changed through [`ParameterInfo`]. A
/// recompute with the same parameters and sample rate as the last one is
/// skipped.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Low Frequency | 20.0–500.0 Hz | 200.0 |
/// | 1 | Low Gain | -24.0–24.0 dB | 0.0 |
/// | 2 | Mid Frequency | 200.0–5000.0 Hz | 1000.0 |
/// | 3 | Mid Gain | -24.0–24.0 dB | 0.0 |
/// | 4 | Mid Q | 0.1–10.0 | 1.0 |
/// | 5 | High Frequency | 2000.0–20000.0 Hz | 5000.0 |
/// | 6 | High Gain | -24.0–24.0 dB | 0.0 |
///
/// # Example
///
/// ```rust
/// use trieq_core::ProcessSpec;
/// use trieq_eq::{EqParams, ThreeBandEq};
///
/// let mut eq = ThreeBandEq::new();
/// eq.prepare(ProcessSpec::new(48000.0, 256, 2));
/// eq.update_from_parameters(&EqParams {
///     low_gain: 4.0,
///     high_gain: -3.0,
///     ..EqParams::default()
/// });
///
/// let mut left = vec![0.25_f32; 256];
/// let mut right = vec![-0.25_f32; 256];
/// eq.process(&mut [&mut left[..], &mut right[..]]);
/// ```
#[derive(Debug, Clone)]
pub struct ThreeBandEq {
    bands: [Band; 3],
    params: EqParams,
    spec: ProcessSpec,
    state: ChainState,
    /// Parameters and sample rate the installed coefficients were designed for.
    designed_for: Option<(EqParams, f32)>,
    /// Last `SharedParams` generation applied by `process_shared`.
    seen_generation: Option<u32>,
    sanitize_output: bool,
}

impl Default for ThreeBandEq {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreeBandEq {
    /// Creates an unprepared chain with default (flat) parameters.
    pub fn new() -> Self {
        Self::with_params(EqParams::default())
    }

    /// Creates an unprepared chain with the given parameters.
    pub fn with_params(params: EqParams) -> Self {
        Self {
            bands: BandRole::ALL.map(Band::new),
            params: params.clamped(),
            spec: ProcessSpec::default(),
            state: ChainState::Unprepared,
            designed_for: None,
            seen_generation: None,
            sanitize_output: false,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ChainState {
        self.state
    }

    /// Returns `true` once prepared and until released.
    pub fn is_prepared(&self) -> bool {
        self.state == ChainState::Ready
    }

    /// Current parameter values.
    pub fn params(&self) -> &EqParams {
        &self.params
    }

    /// The spec from the last `prepare`.
    pub fn spec(&self) -> ProcessSpec {
        self.spec
    }

    /// Sample rate from the last `prepare`.
    pub fn sample_rate(&self) -> f32 {
        self.spec.sample_rate
    }

    /// Channels with filter state. Zero while unprepared.
    pub fn num_channels(&self) -> usize {
        self.bands[0].num_channels()
    }

    /// The band playing `role`.
    pub fn band(&self, role: BandRole) -> &Band {
        &self.bands[role as usize]
    }

    /// Installed coefficients in chain order.
    pub fn coefficients(&self) -> [BiquadCoefficients; 3] {
        [
            self.bands[0].coefficients(),
            self.bands[1].coefficients(),
            self.bands[2].coefficients(),
        ]
    }

    /// Analytic magnitude of the whole chain at `frequency`, in dB.
    pub fn magnitude_db(&self, frequency: f32) -> f32 {
        let sample_rate = self.spec.sample_rate;
        let linear: f32 = self
            .bands
            .iter()
            .map(|b| b.coefficients().magnitude(frequency, sample_rate))
            .product();
        linear_to_db(linear)
    }

    /// Replace non-finite output samples with silence. The band states that
    /// produced them are zeroed on the spot, so processing resumes with the
    /// next sample. Off by default.
    pub fn set_sanitize_output(&mut self, enabled: bool) {
        self.sanitize_output = enabled;
    }

    /// Whether the output sanitizer is enabled.
    pub fn sanitize_output(&self) -> bool {
        self.sanitize_output
    }

    /// Allocates and zeroes per-channel state for every band, then designs
    /// coefficients for `spec.sample_rate`.
    ///
    /// The only allocating call. Re-run when the sample rate or channel
    /// count changes. `spec.sample_rate` must be positive and finite.
    pub fn prepare(&mut self, spec: ProcessSpec) {
        debug_assert!(
            spec.sample_rate.is_finite() && spec.sample_rate > 0.0,
            "invalid sample rate {}",
            spec.sample_rate
        );
        for band in &mut self.bands {
            band.prepare(spec.num_channels);
        }
        self.spec = spec;
        self.state = ChainState::Ready;
        self.designed_for = None;
        self.refresh_coefficients();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate = spec.sample_rate,
            channels = spec.num_channels,
            max_block = spec.max_block_size,
            "eq prepared"
        );
    }

    /// Stores `params` (clamped) and installs freshly designed coefficients
    /// for all three bands together.
    ///
    /// While unprepared the parameters are only stored; `prepare` designs
    /// from them.
    pub fn update_from_parameters(&mut self, params: &EqParams) {
        self.params = params.clamped();
        if self.is_prepared() {
            self.refresh_coefficients();
        }
    }

    /// Redesigns all bands unless the installed set already matches the
    /// current parameters and sample rate.
    fn refresh_coefficients(&mut self) {
        let key = (self.params, self.spec.sample_rate);
        if self.designed_for == Some(key) {
            return;
        }
        for band in &mut self.bands {
            let coefficients = band.role().design(self.spec.sample_rate, &self.params);
            band.set_coefficients(coefficients);
        }
        self.designed_for = Some(key);
    }

    /// Filters `block` in place: each channel, sample by sample, through
    /// low → mid → high. Subnormal input samples are flushed to zero first.
    ///
    /// Channels past the prepared count are left untouched. Calling this
    /// before `prepare` asserts in debug builds and is a no-op otherwise.
    pub fn process(&mut self, block: &mut [&mut [f32]]) {
        debug_assert!(self.is_prepared(), "ThreeBandEq::process called before prepare");
        if !self.is_prepared() {
            return;
        }
        self.refresh_coefficients();

        let sanitizing = self.sanitize_output;
        let [low, mid, high] = &mut self.bands;
        for (channel, samples) in block.iter_mut().enumerate().take(low.num_channels()) {
            for sample in samples.iter_mut() {
                let mut y = low.process_sample(channel, flush_denormal(*sample));
                y = mid.process_sample(channel, y);
                y = high.process_sample(channel, y);
                if sanitizing && !y.is_finite() {
                    y = sanitize(y);
                    for band in [&mut *low, &mut *mid, &mut *high] {
                        if !band.is_channel_finite(channel) {
                            band.reset_channel(channel);
                        }
                    }
                }
                *sample = y;
            }
        }
    }

    /// Picks up any parameter change published through `shared`, then
    /// processes `block`.
    ///
    /// Reads the generation counter once; the seven values are only loaded
    /// when it moved since the last call.
    pub fn process_shared(&mut self, shared: &SharedParams, block: &mut [&mut [f32]]) {
        let generation = shared.generation();
        if self.seen_generation != Some(generation) {
            self.seen_generation = Some(generation);
            let snapshot = shared.snapshot();
            self.update_from_parameters(&snapshot);
        }
        self.process(block);
    }

    /// Zeroes all filter state. Parameters and coefficients are kept.
    pub fn reset(&mut self) {
        for band in &mut self.bands {
            band.reset();
        }
    }

    /// Drops per-channel state and returns to [`ChainState::Unprepared`].
    pub fn release(&mut self) {
        for band in &mut self.bands {
            band.release();
        }
        self.state = ChainState::Unprepared;
        self.seen_generation = None;

        #[cfg(feature = "tracing")]
        tracing::debug!("eq released");
    }
}

impl Processor for ThreeBandEq {
    fn prepare(&mut self, spec: ProcessSpec) {
        ThreeBandEq::prepare(self, spec);
    }

    fn process(&mut self, block: &mut [&mut [f32]]) {
        ThreeBandEq::process(self, block);
    }

    fn reset(&mut self) {
        ThreeBandEq::reset(self);
    }

    fn release(&mut self) {
        ThreeBandEq::release(self);
    }

    fn is_prepared(&self) -> bool {
        ThreeBandEq::is_prepared(self)
    }
}

impl ParameterInfo for ThreeBandEq {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        descriptor(index)
    }

    fn get_param(&self, index: usize) -> f32 {
        self.params.get(index).unwrap_or(0.0)
    }

    /// Stores the clamped value. Coefficients follow at the next block.
    fn set_param(&mut self, index: usize, value: f32) {
        self.params.set(index, value);
    }
}
