//! Biquad (bi-quadratic) filter coefficients, state, and EQ designs.
//!
//! Coefficients and per-channel state are separate types so that one
//! coefficient set can drive any number of channels:
//!
//! - [`BiquadCoefficients`] - normalized taps (`a0 == 1`), `Copy`, replaced wholesale
//! - [`BiquadState`] - Direct Form I delay registers for one channel
//! - [`Biquad`] - coefficients + a single state, for mono use
//!
//! The shelf and peaking designs follow the RBJ Audio EQ Cookbook and take the
//! gain as a linear amplitude factor (see [`db_to_linear`](crate::db_to_linear)).

use libm::{cosf, sinf, sqrtf};

use crate::math::{flush_denormal, hz_to_omega, linear_to_db};

/// Lowest frequency any design will accept, in Hz.
pub const MIN_FREQUENCY_HZ: f32 = 20.0;

/// Highest design frequency as a fraction of the sample rate (just under Nyquist).
pub const MAX_FREQUENCY_RATIO: f32 = 0.49;

/// Smallest Q any design will accept. Non-positive and NaN Q values clamp here.
pub const MIN_Q: f32 = 0.05;

/// Smallest linear gain any design will accept (-120 dB).
pub const MIN_LINEAR_GAIN: f32 = 1.0e-6;

/// Clamp a design frequency to `[MIN_FREQUENCY_HZ, MAX_FREQUENCY_RATIO * sample_rate]`.
///
/// NaN maps to [`MIN_FREQUENCY_HZ`]. When the sample rate is so low that the
/// upper bound falls below 20 Hz, the upper bound wins so the result always
/// stays below Nyquist.
///
/// ```rust
/// use trieq_core::clamp_frequency;
///
/// assert_eq!(clamp_frequency(0.0, 48000.0), 20.0);
/// assert_eq!(clamp_frequency(30000.0, 48000.0), 48000.0 * 0.49);
/// assert_eq!(clamp_frequency(1000.0, 48000.0), 1000.0);
/// ```
#[inline]
pub fn clamp_frequency(frequency: f32, sample_rate: f32) -> f32 {
    frequency
        .max(MIN_FREQUENCY_HZ)
        .min(sample_rate * MAX_FREQUENCY_RATIO)
}

/// Clamp a Q value to at least [`MIN_Q`]. NaN maps to [`MIN_Q`].
#[inline]
pub fn clamp_q(q: f32) -> f32 {
    if q > MIN_Q { q } else { MIN_Q }
}

/// Normalized biquad coefficients (`a0` implicitly 1).
///
/// Transfer function:
/// ```text
///         b0 + b1*z^-1 + b2*z^-2
/// H(z) = ------------------------
///          1 + a1*z^-1 + a2*z^-2
/// ```
///
/// Values are immutable once designed: filters swap in a whole new set via
/// `set_coefficients` rather than editing taps in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    /// Feedforward tap for x[n].
    pub b0: f32,
    /// Feedforward tap for x[n-1].
    pub b1: f32,
    /// Feedforward tap for x[n-2].
    pub b2: f32,
    /// Feedback tap for y[n-1].
    pub a1: f32,
    /// Feedback tap for y[n-2].
    pub a2: f32,
}

impl BiquadCoefficients {
    /// Passthrough coefficients: `y[n] = x[n]`.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Build from raw (unnormalized) taps, dividing everything by `a0`.
    pub fn from_raw(b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) -> Self {
        let a0_inv = 1.0 / a0;
        Self {
            b0: b0 * a0_inv,
            b1: b1 * a0_inv,
            b2: b2 * a0_inv,
            a1: a1 * a0_inv,
            a2: a2 * a0_inv,
        }
    }

    /// Returns `true` if every tap is finite.
    pub fn is_finite(&self) -> bool {
        self.b0.is_finite()
            && self.b1.is_finite()
            && self.b2.is_finite()
            && self.a1.is_finite()
            && self.a2.is_finite()
    }

    /// Magnitude of the frequency response at `frequency`, as a linear factor.
    ///
    /// Evaluates `|H(e^jw)|` analytically; no signal is processed.
    pub fn magnitude(&self, frequency: f32, sample_rate: f32) -> f32 {
        let w = hz_to_omega(frequency, sample_rate);
        let (cos1, sin1) = (cosf(w), sinf(w));
        let (cos2, sin2) = (cosf(2.0 * w), sinf(2.0 * w));

        let num_re = self.b0 + self.b1 * cos1 + self.b2 * cos2;
        let num_im = -(self.b1 * sin1 + self.b2 * sin2);
        let den_re = 1.0 + self.a1 * cos1 + self.a2 * cos2;
        let den_im = -(self.a1 * sin1 + self.a2 * sin2);

        let num = num_re * num_re + num_im * num_im;
        let den = den_re * den_re + den_im * den_im;
        sqrtf(num / den)
    }

    /// Magnitude of the frequency response at `frequency`, in dB.
    pub fn magnitude_db(&self, frequency: f32, sample_rate: f32) -> f32 {
        linear_to_db(self.magnitude(frequency, sample_rate))
    }
}

impl Default for BiquadCoefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Direct Form I delay registers for one channel.
///
/// Holds the two previous inputs and two previous outputs. The state is
/// meaningful only together with the coefficients that produced it; swapping
/// coefficients keeps the history so the output stays continuous.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BiquadState {
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl BiquadState {
    /// Zeroed state.
    pub const fn new() -> Self {
        Self {
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Run one sample through the difference equation
    /// ```text
    /// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]
    /// ```
    /// and advance the registers.
    ///
    /// Input and output are flushed to zero below the subnormal range, so
    /// neither the registers nor the returned sample ever hold a denormal.
    #[inline]
    pub fn process(&mut self, c: &BiquadCoefficients, input: f32) -> f32 {
        let input = flush_denormal(input);
        let output = flush_denormal(
            c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2,
        );

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Zero all registers.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns `true` if no register holds a signal.
    pub fn is_silent(&self) -> bool {
        self.x1 == 0.0 && self.x2 == 0.0 && self.y1 == 0.0 && self.y2 == 0.0
    }

    /// Returns `true` if every register is finite.
    pub fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.x2.is_finite() && self.y1.is_finite() && self.y2.is_finite()
    }
}

/// Single-channel biquad: one coefficient set plus one state.
///
/// # Example
///
/// ```rust
/// use trieq_core::{Biquad, db_to_linear, peaking};
///
/// let mut filter = Biquad::new();
/// filter.set_coefficients(peaking(48000.0, 1000.0, 1.0, db_to_linear(6.0)));
/// let y = filter.process(1.0);
/// assert!(y.is_finite());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Biquad {
    coefficients: BiquadCoefficients,
    state: BiquadState,
}

impl Biquad {
    /// Creates a biquad with passthrough coefficients and zeroed state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the coefficient set. The delay registers are kept.
    pub fn set_coefficients(&mut self, coefficients: BiquadCoefficients) {
        self.coefficients = coefficients;
    }

    /// Current coefficient set.
    pub fn coefficients(&self) -> BiquadCoefficients {
        self.coefficients
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.state.process(&self.coefficients, input)
    }

    /// Clears the delay registers without touching the coefficients.
    pub fn clear(&mut self) {
        self.state.clear();
    }
}

/// Shared shelf intermediates: `A`, `cos(w0)` and `beta = sin(w0)*sqrt(A)/Q`.
fn shelf_terms(sample_rate: f32, frequency: f32, q: f32, linear_gain: f32) -> (f32, f32, f32) {
    let a = sqrtf(linear_gain.max(MIN_LINEAR_GAIN));
    let omega = hz_to_omega(clamp_frequency(frequency, sample_rate), sample_rate);
    let beta = sinf(omega) * sqrtf(a) / clamp_q(q);
    (a, cosf(omega), beta)
}

/// Low-shelf design (RBJ cookbook).
///
/// Frequencies below `frequency` are scaled by `linear_gain`; the response
/// returns to unity well above it. `q` sets the shelf slope (0.7 gives a
/// smooth, non-resonant transition).
///
/// Out-of-range `frequency` and `q` are clamped (see [`clamp_frequency`],
/// [`clamp_q`]); the result is always finite for a positive sample rate.
pub fn low_shelf(sample_rate: f32, frequency: f32, q: f32, linear_gain: f32) -> BiquadCoefficients {
    let (a, cos_omega, beta) = shelf_terms(sample_rate, frequency, q, linear_gain);
    let a_plus_1 = a + 1.0;
    let a_minus_1 = a - 1.0;
    let a_minus_1_cos = a_minus_1 * cos_omega;

    BiquadCoefficients::from_raw(
        a * (a_plus_1 - a_minus_1_cos + beta),
        a * 2.0 * (a_minus_1 - a_plus_1 * cos_omega),
        a * (a_plus_1 - a_minus_1_cos - beta),
        a_plus_1 + a_minus_1_cos + beta,
        -2.0 * (a_minus_1 + a_plus_1 * cos_omega),
        a_plus_1 + a_minus_1_cos - beta,
    )
}

/// High-shelf design (RBJ cookbook).
///
/// Mirror image of [`low_shelf`]: frequencies above `frequency` are scaled by
/// `linear_gain`.
pub fn high_shelf(sample_rate: f32, frequency: f32, q: f32, linear_gain: f32) -> BiquadCoefficients {
    let (a, cos_omega, beta) = shelf_terms(sample_rate, frequency, q, linear_gain);
    let a_plus_1 = a + 1.0;
    let a_minus_1 = a - 1.0;
    let a_minus_1_cos = a_minus_1 * cos_omega;

    BiquadCoefficients::from_raw(
        a * (a_plus_1 + a_minus_1_cos + beta),
        a * -2.0 * (a_minus_1 + a_plus_1 * cos_omega),
        a * (a_plus_1 + a_minus_1_cos - beta),
        a_plus_1 - a_minus_1_cos + beta,
        2.0 * (a_minus_1 - a_plus_1 * cos_omega),
        a_plus_1 - a_minus_1_cos - beta,
    )
}

/// Peaking EQ design (RBJ cookbook).
///
/// Boosts or cuts around `frequency` by `linear_gain`; bandwidth narrows as
/// `q` grows. Unity gain produces an exact passthrough transfer function.
pub fn peaking(sample_rate: f32, frequency: f32, q: f32, linear_gain: f32) -> BiquadCoefficients {
    let a = sqrtf(linear_gain.max(MIN_LINEAR_GAIN));
    let omega = hz_to_omega(clamp_frequency(frequency, sample_rate), sample_rate);
    let alpha = sinf(omega) / (2.0 * clamp_q(q));
    let c2 = -2.0 * cosf(omega);

    BiquadCoefficients::from_raw(
        1.0 + alpha * a,
        c2,
        1.0 - alpha * a,
        1.0 + alpha / a,
        c2,
        1.0 - alpha / a,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::db_to_linear;

    const SR: f32 = 48000.0;

    #[test]
    fn test_identity_passthrough() {
        let mut biquad = Biquad::new();
        for i in 0..10 {
            let input = i as f32 * 0.1;
            assert_eq!(biquad.process(input), input);
        }
    }

    #[test]
    fn test_subnormal_input_never_reaches_registers_or_output() {
        let c = low_shelf(SR, 200.0, 0.7, db_to_linear(6.0));
        let mut state = BiquadState::new();
        for _ in 0..64 {
            let y = state.process(&c, 1.0e-39);
            assert_eq!(y, 0.0);
        }
        assert!(state.is_silent());
    }

    #[test]
    fn test_state_clear() {
        let c = peaking(SR, 1000.0, 1.0, 2.0);
        let mut state = BiquadState::new();
        for _ in 0..10 {
            state.process(&c, 1.0);
        }
        assert!(!state.is_silent());
        state.clear();
        assert!(state.is_silent());
    }

    #[test]
    fn test_peaking_matches_cookbook_reference() {
        // 1 kHz, +6 dB, Q = 1 at 48 kHz, computed in f64 from the cookbook.
        let c = peaking(SR, 1000.0, 1.0, db_to_linear(6.0));
        let expected = [
            1.043_953_1,
            -1.895_320_7,
            0.867_722_3,
            -1.895_320_7,
            0.911_675_4,
        ];
        let got = [c.b0, c.b1, c.b2, c.a1, c.a2];
        for (g, e) in got.iter().zip(expected.iter()) {
            assert!((g - e).abs() < 1e-5, "got {g}, expected {e}");
        }
    }

    #[test]
    fn test_unity_gain_designs_are_transparent() {
        for c in [
            low_shelf(SR, 200.0, 0.7, 1.0),
            peaking(SR, 1000.0, 1.0, 1.0),
            high_shelf(SR, 5000.0, 0.7, 1.0),
        ] {
            assert!((c.b0 - 1.0).abs() < 1e-6);
            assert_eq!(c.b1, c.a1);
            assert_eq!(c.b2, c.a2);
        }
    }

    #[test]
    fn test_low_shelf_gain_at_dc_and_nyquist() {
        let c = low_shelf(SR, 200.0, 0.7, db_to_linear(6.0));
        assert!((c.magnitude_db(1.0, SR) - 6.0).abs() < 0.05);
        assert!(c.magnitude_db(20000.0, SR).abs() < 0.05);
    }

    #[test]
    fn test_high_shelf_gain_at_dc_and_nyquist() {
        let c = high_shelf(SR, 5000.0, 0.7, db_to_linear(-6.0));
        assert!(c.magnitude_db(10.0, SR).abs() < 0.05);
        assert!((c.magnitude_db(23990.0, SR) + 6.0).abs() < 0.05);
    }

    #[test]
    fn test_peaking_gain_at_centre() {
        let c = peaking(SR, 1000.0, 2.0, db_to_linear(-9.0));
        assert!((c.magnitude_db(1000.0, SR) + 9.0).abs() < 0.01);
    }

    #[test]
    fn test_out_of_range_inputs_are_clamped() {
        for freq in [0.0, -100.0, f32::NAN, SR * 0.5, SR, f32::INFINITY] {
            assert!(low_shelf(SR, freq, 0.7, 2.0).is_finite(), "freq {freq}");
            assert!(peaking(SR, freq, 1.0, 2.0).is_finite(), "freq {freq}");
            assert!(high_shelf(SR, freq, 0.7, 2.0).is_finite(), "freq {freq}");
        }
        for q in [0.0, -1.0, f32::NAN] {
            assert!(peaking(SR, 1000.0, q, 2.0).is_finite(), "q {q}");
            assert!(low_shelf(SR, 100.0, q, 2.0).is_finite(), "q {q}");
        }
        assert!(peaking(SR, 1000.0, 1.0, 0.0).is_finite());
    }

    #[test]
    fn test_clamp_frequency_low_sample_rate() {
        // Upper bound wins when it sits below the 20 Hz floor.
        let f = clamp_frequency(100.0, 30.0);
        assert!(f < 15.0);
    }

    #[test]
    fn test_clamp_q() {
        assert_eq!(clamp_q(0.0), MIN_Q);
        assert_eq!(clamp_q(-3.0), MIN_Q);
        assert_eq!(clamp_q(f32::NAN), MIN_Q);
        assert_eq!(clamp_q(2.5), 2.5);
    }

    #[test]
    fn test_identical_inputs_give_identical_coefficients() {
        let a = high_shelf(44100.0, 8000.0, 0.7, db_to_linear(-6.0));
        let b = high_shelf(44100.0, 8000.0, 0.7, db_to_linear(-6.0));
        assert_eq!(a, b);
    }
}
