//! Level measurement: RMS and peak.
//!
//! The dB variants floor silence at -200 dB, as [`linear_to_db`] does.

use trieq_core::linear_to_db;

/// Root-mean-square level, linear. Zero for an empty slice.
pub fn rms(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }
    let energy: f32 = signal.iter().map(|&x| x * x).sum();
    (energy / signal.len() as f32).sqrt()
}

/// [`rms`] in dB.
pub fn rms_db(signal: &[f32]) -> f32 {
    linear_to_db(rms(signal))
}

/// Largest absolute sample value.
pub fn peak(signal: &[f32]) -> f32 {
    signal.iter().fold(0.0_f32, |acc, x| acc.max(x.abs()))
}

/// [`peak`] in dB.
pub fn peak_db(signal: &[f32]) -> f32 {
    linear_to_db(peak(signal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rms_of_constant() {
        assert!((rms(&[0.5; 100]) - 0.5).abs() < 1e-6);
        assert_eq!(rms(&[]), 0.0);
    }

    #[test]
    fn test_peak() {
        assert_eq!(peak(&[0.1, -0.8, 0.3]), 0.8);
        assert_eq!(peak(&[]), 0.0);
        assert!((peak_db(&[0.5]) + 6.0206).abs() < 1e-3);
    }

    #[test]
    fn test_silence_floor() {
        assert!((rms_db(&[0.0; 16]) + 200.0).abs() < 0.01);
    }
}
