//! The seven user-facing equalizer parameters.

use trieq_core::{ParamDescriptor, ParamId};

/// Number of equalizer parameters.
pub const PARAM_COUNT: usize = 7;

/// Index of the low shelf corner frequency.
pub const LOW_FREQ: usize = 0;
/// Index of the low shelf gain.
pub const LOW_GAIN: usize = 1;
/// Index of the peak centre frequency.
pub const MID_FREQ: usize = 2;
/// Index of the peak gain.
pub const MID_GAIN: usize = 3;
/// Index of the peak Q.
pub const MID_Q: usize = 4;
/// Index of the high shelf corner frequency.
pub const HIGH_FREQ: usize = 5;
/// Index of the high shelf gain.
pub const HIGH_GAIN: usize = 6;

/// Descriptor table, indexed by parameter position.
///
/// | Index | ID | Range | Default |
/// |-------|----|-------|---------|
/// | 0 | `low_freq` | 20–500 Hz | 200 |
/// | 1 | `low_gain` | -24–24 dB | 0 |
/// | 2 | `mid_freq` | 200–5000 Hz | 1000 |
/// | 3 | `mid_gain` | -24–24 dB | 0 |
/// | 4 | `mid_q` | 0.1–10 | 1.0 |
/// | 5 | `high_freq` | 2000–20000 Hz | 5000 |
/// | 6 | `high_gain` | -24–24 dB | 0 |
pub const PARAM_DESCRIPTORS: [ParamDescriptor; PARAM_COUNT] = [
    ParamDescriptor::frequency_hz("Low Frequency", "LowFreq", 20.0, 500.0, 200.0)
        .with_id(ParamId(100), "low_freq"),
    ParamDescriptor::gain_db("Low Gain", "LowGain", -24.0, 24.0, 0.0)
        .with_id(ParamId(101), "low_gain"),
    ParamDescriptor::frequency_hz("Mid Frequency", "MidFreq", 200.0, 5000.0, 1000.0)
        .with_id(ParamId(102), "mid_freq"),
    ParamDescriptor::gain_db("Mid Gain", "MidGain", -24.0, 24.0, 0.0)
        .with_id(ParamId(103), "mid_gain"),
    ParamDescriptor::q_factor("Mid Q", "MidQ", 0.1, 10.0, 1.0).with_id(ParamId(104), "mid_q"),
    ParamDescriptor::frequency_hz("High Frequency", "HighFreq", 2000.0, 20000.0, 5000.0)
        .with_id(ParamId(105), "high_freq"),
    ParamDescriptor::gain_db("High Gain", "HighGain", -24.0, 24.0, 0.0)
        .with_id(ParamId(106), "high_gain"),
];

/// Returns the descriptor for the parameter at `index`.
pub fn descriptor(index: usize) -> Option<ParamDescriptor> {
    PARAM_DESCRIPTORS.get(index).copied()
}

/// Looks up a parameter index by its string ID (`"mid_q"`).
pub fn index_of(string_id: &str) -> Option<usize> {
    PARAM_DESCRIPTORS
        .iter()
        .position(|d| d.string_id == string_id)
}

/// A complete set of equalizer parameter values.
///
/// Gains are in dB, frequencies in Hz. Values written through [`set`](Self::set)
/// are clamped to the descriptor ranges; the struct fields themselves are
/// public so a caller may build any value, and the coefficient designs clamp
/// again against the sample rate.
///
/// # Example
///
/// ```rust
/// use trieq_eq::{EqParams, params};
///
/// let mut p = EqParams::default();
/// p.set(params::LOW_GAIN, 6.0);
/// p.set(params::MID_Q, 50.0);
/// assert_eq!(p.low_gain, 6.0);
/// assert_eq!(p.mid_q, 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EqParams {
    /// Low shelf corner frequency in Hz.
    pub low_freq: f32,
    /// Low shelf gain in dB.
    pub low_gain: f32,
    /// Peak centre frequency in Hz.
    pub mid_freq: f32,
    /// Peak gain in dB.
    pub mid_gain: f32,
    /// Peak Q.
    pub mid_q: f32,
    /// High shelf corner frequency in Hz.
    pub high_freq: f32,
    /// High shelf gain in dB.
    pub high_gain: f32,
}

impl Default for EqParams {
    fn default() -> Self {
        Self::from_values(&PARAM_DESCRIPTORS.map(|d| d.default))
    }
}

impl EqParams {
    /// All bands at 0 dB: the chain is transparent.
    pub fn flat() -> Self {
        Self::default()
    }

    /// Builds parameters from values in index order, clamping each.
    pub fn from_values(values: &[f32; PARAM_COUNT]) -> Self {
        let mut params = Self {
            low_freq: 0.0,
            low_gain: 0.0,
            mid_freq: 0.0,
            mid_gain: 0.0,
            mid_q: 0.0,
            high_freq: 0.0,
            high_gain: 0.0,
        };
        for (index, &value) in values.iter().enumerate() {
            params.set(index, value);
        }
        params
    }

    /// Values in index order.
    pub fn to_values(&self) -> [f32; PARAM_COUNT] {
        [
            self.low_freq,
            self.low_gain,
            self.mid_freq,
            self.mid_gain,
            self.mid_q,
            self.high_freq,
            self.high_gain,
        ]
    }

    /// Value at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<f32> {
        self.to_values().get(index).copied()
    }

    /// Writes the value at `index`, clamped to its range. Unknown indices are ignored.
    pub fn set(&mut self, index: usize, value: f32) {
        let Some(desc) = descriptor(index) else {
            return;
        };
        let value = desc.clamp(value);
        match index {
            LOW_FREQ => self.low_freq = value,
            LOW_GAIN => self.low_gain = value,
            MID_FREQ => self.mid_freq = value,
            MID_GAIN => self.mid_gain = value,
            MID_Q => self.mid_q = value,
            HIGH_FREQ => self.high_freq = value,
            HIGH_GAIN => self.high_gain = value,
            _ => {}
        }
    }

    /// Returns a copy with every field clamped to its descriptor range.
    pub fn clamped(&self) -> Self {
        Self::from_values(&self.to_values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = EqParams::default();
        assert_eq!(p.low_freq, 200.0);
        assert_eq!(p.mid_freq, 1000.0);
        assert_eq!(p.mid_q, 1.0);
        assert_eq!(p.high_freq, 5000.0);
        assert_eq!(p.low_gain, 0.0);
        assert_eq!(p.mid_gain, 0.0);
        assert_eq!(p.high_gain, 0.0);
    }

    #[test]
    fn test_set_clamps() {
        let mut p = EqParams::default();
        p.set(LOW_FREQ, 0.0);
        p.set(HIGH_FREQ, 96000.0);
        p.set(MID_GAIN, -100.0);
        p.set(MID_Q, f32::NAN);
        assert_eq!(p.low_freq, 20.0);
        assert_eq!(p.high_freq, 20000.0);
        assert_eq!(p.mid_gain, -24.0);
        assert_eq!(p.mid_q, 1.0);
    }

    #[test]
    fn test_unknown_index_ignored() {
        let mut p = EqParams::default();
        p.set(PARAM_COUNT, 3.0);
        assert_eq!(p, EqParams::default());
        assert_eq!(p.get(PARAM_COUNT), None);
    }

    #[test]
    fn test_values_roundtrip() {
        let values = [100.0, 6.0, 800.0, -3.0, 2.0, 8000.0, -6.0];
        let p = EqParams::from_values(&values);
        assert_eq!(p.to_values(), values);
        assert_eq!(p.get(MID_Q), Some(2.0));
    }

    #[test]
    fn test_string_ids_are_unique_and_indexed() {
        for (i, d) in PARAM_DESCRIPTORS.iter().enumerate() {
            assert_eq!(index_of(d.string_id), Some(i));
            assert!(d.short_name.len() <= 8, "{} too long", d.short_name);
            assert!(d.contains(d.default));
        }
        assert_eq!(index_of("low_q"), None);
    }

    #[test]
    fn test_clamped() {
        let p = EqParams {
            low_freq: 5.0,
            ..EqParams::default()
        };
        assert_eq!(p.clamped().low_freq, 20.0);
    }
}
