//! One equalizer band: a coefficient set shared by every channel, plus
//! independent filter state per channel.

use alloc::vec::Vec;

use trieq_core::{BiquadCoefficients, BiquadState, db_to_linear, high_shelf, low_shelf, peaking};

use crate::params::EqParams;

/// Design Q of both shelves. Gives a smooth, non-resonant transition.
pub const SHELF_Q: f32 = 0.7;

/// Position and filter shape of a band in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandRole {
    /// Low shelf at `low_freq`, fixed Q.
    Low,
    /// Peaking filter at `mid_freq` with user Q.
    Mid,
    /// High shelf at `high_freq`, fixed Q.
    High,
}

impl BandRole {
    /// All roles in processing order.
    pub const ALL: [BandRole; 3] = [BandRole::Low, BandRole::Mid, BandRole::High];

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            BandRole::Low => "low",
            BandRole::Mid => "mid",
            BandRole::High => "high",
        }
    }

    /// Designs this band's coefficients from `params` at `sample_rate`.
    pub fn design(self, sample_rate: f32, params: &EqParams) -> BiquadCoefficients {
        match self {
            BandRole::Low => low_shelf(
                sample_rate,
                params.low_freq,
                SHELF_Q,
                db_to_linear(params.low_gain),
            ),
            BandRole::Mid => peaking(
                sample_rate,
                params.mid_freq,
                params.mid_q,
                db_to_linear(params.mid_gain),
            ),
            BandRole::High => high_shelf(
                sample_rate,
                params.high_freq,
                SHELF_Q,
                db_to_linear(params.high_gain),
            ),
        }
    }
}

/// A biquad band with one [`BiquadState`] per channel.
///
/// Coefficients are swapped wholesale; the channel states survive the swap.
#[derive(Debug, Clone)]
pub struct Band {
    role: BandRole,
    coefficients: BiquadCoefficients,
    states: Vec<BiquadState>,
}

impl Band {
    /// Creates a band with passthrough coefficients and no channels.
    pub fn new(role: BandRole) -> Self {
        Self {
            role,
            coefficients: BiquadCoefficients::IDENTITY,
            states: Vec::new(),
        }
    }

    /// The band's role.
    pub fn role(&self) -> BandRole {
        self.role
    }

    /// Current coefficients.
    pub fn coefficients(&self) -> BiquadCoefficients {
        self.coefficients
    }

    /// Installs new coefficients. Never touches the channel states.
    pub fn set_coefficients(&mut self, coefficients: BiquadCoefficients) {
        self.coefficients = coefficients;
    }

    /// Number of channels with state.
    pub fn num_channels(&self) -> usize {
        self.states.len()
    }

    /// Allocates zeroed state for `num_channels` channels.
    pub fn prepare(&mut self, num_channels: usize) {
        self.states.clear();
        self.states.resize(num_channels, BiquadState::new());
    }

    /// Drops all channel state.
    pub fn release(&mut self) {
        self.states = Vec::new();
    }

    /// Zeroes every channel's state.
    pub fn reset(&mut self) {
        for state in &mut self.states {
            state.clear();
        }
    }

    /// Zeroes one channel's state.
    pub fn reset_channel(&mut self, channel: usize) {
        if let Some(state) = self.states.get_mut(channel) {
            state.clear();
        }
    }

    /// Returns `false` if the channel's state holds NaN or infinity.
    pub fn is_channel_finite(&self, channel: usize) -> bool {
        self.states.get(channel).is_none_or(BiquadState::is_finite)
    }

    /// Filters one sample on `channel`. Unknown channels pass through.
    #[inline]
    pub fn process_sample(&mut self, channel: usize, input: f32) -> f32 {
        match self.states.get_mut(channel) {
            Some(state) => state.process(&self.coefficients, input),
            None => input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_band_is_passthrough() {
        let mut band = Band::new(BandRole::Mid);
        band.prepare(1);
        assert_eq!(band.process_sample(0, 0.3), 0.3);
        assert_eq!(band.process_sample(5, 0.7), 0.7);
    }

    #[test]
    fn test_channels_are_independent() {
        let params = EqParams {
            mid_gain: 9.0,
            ..EqParams::default()
        };
        let mut band = Band::new(BandRole::Mid);
        band.set_coefficients(BandRole::Mid.design(48000.0, &params));
        band.prepare(2);

        band.process_sample(0, 1.0);
        for _ in 0..16 {
            assert_eq!(band.process_sample(1, 0.0), 0.0);
        }
    }

    #[test]
    fn test_coefficient_swap_keeps_state() {
        let mut band = Band::new(BandRole::Low);
        band.prepare(1);
        band.set_coefficients(BandRole::Low.design(
            48000.0,
            &EqParams {
                low_gain: 6.0,
                ..EqParams::default()
            },
        ));
        band.process_sample(0, 1.0);

        band.set_coefficients(BandRole::Low.design(48000.0, &EqParams::default()));
        // History from the first impulse still rings through.
        assert_ne!(band.process_sample(0, 0.0), 0.0);
    }

    #[test]
    fn test_reset_channel() {
        let mut band = Band::new(BandRole::High);
        band.set_coefficients(BandRole::High.design(
            48000.0,
            &EqParams {
                high_gain: -6.0,
                ..EqParams::default()
            },
        ));
        band.prepare(2);
        band.process_sample(0, f32::NAN);
        band.process_sample(1, 0.5);
        assert!(!band.is_channel_finite(0));
        assert!(band.is_channel_finite(1));

        band.reset_channel(0);
        assert!(band.is_channel_finite(0));
        assert_eq!(band.process_sample(0, 0.0), 0.0);
    }

    #[test]
    fn test_prepare_and_release() {
        let mut band = Band::new(BandRole::Low);
        band.prepare(4);
        assert_eq!(band.num_channels(), 4);
        band.release();
        assert_eq!(band.num_channels(), 0);
    }

    #[test]
    fn test_shelves_use_fixed_q() {
        // Shelf design ignores mid_q.
        let a = EqParams {
            low_gain: 6.0,
            mid_q: 0.1,
            ..EqParams::default()
        };
        let b = EqParams { mid_q: 10.0, ..a };
        assert_eq!(
            BandRole::Low.design(48000.0, &a),
            BandRole::Low.design(48000.0, &b)
        );
        assert_eq!(
            BandRole::Low.design(48000.0, &a),
            low_shelf(48000.0, 200.0, SHELF_Q, db_to_linear(6.0))
        );
    }
}
