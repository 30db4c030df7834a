//! Frequency response of biquad cascades, analytic and measured.

use trieq_core::{BiquadCoefficients, linear_to_db};

use crate::fft::Fft;

/// Magnitude of a response at one frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponsePoint {
    /// Frequency in Hz.
    pub frequency: f32,
    /// Magnitude in dB.
    pub magnitude_db: f32,
}

/// `points` frequencies spaced evenly on a log axis from `start` to `end` inclusive.
///
/// ```rust
/// use trieq_analysis::log_spaced;
///
/// let f = log_spaced(20.0, 20000.0, 4);
/// assert_eq!(f.len(), 4);
/// assert!((f[1] - 200.0).abs() < 0.1);
/// ```
pub fn log_spaced(start: f32, end: f32, points: usize) -> Vec<f32> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let ratio = (end / start).ln();
            (0..points)
                .map(|i| start * (ratio * i as f32 / (points - 1) as f32).exp())
                .collect()
        }
    }
}

/// Analytic magnitude of biquads in series at `frequency`, in dB.
pub fn cascade_magnitude_db(
    coefficients: &[BiquadCoefficients],
    frequency: f32,
    sample_rate: f32,
) -> f32 {
    let linear: f32 = coefficients
        .iter()
        .map(|c| c.magnitude(frequency, sample_rate))
        .product();
    linear_to_db(linear)
}

/// Analytic response of biquads in series at each of `frequencies`.
pub fn cascade_response(
    coefficients: &[BiquadCoefficients],
    sample_rate: f32,
    frequencies: &[f32],
) -> Vec<ResponsePoint> {
    frequencies
        .iter()
        .map(|&frequency| ResponsePoint {
            frequency,
            magnitude_db: cascade_magnitude_db(coefficients, frequency, sample_rate),
        })
        .collect()
}

/// Response measured from an impulse response via an `fft_size`-point FFT.
///
/// No window is applied; the impulse response should have decayed within
/// `fft_size` samples.
pub fn measured_response(
    impulse_response: &[f32],
    sample_rate: f32,
    fft_size: usize,
) -> Vec<ResponsePoint> {
    let fft = Fft::new(fft_size);
    fft.forward(impulse_response)
        .iter()
        .enumerate()
        .map(|(bin, c)| ResponsePoint {
            frequency: fft.bin_frequency(bin, sample_rate),
            magnitude_db: linear_to_db(c.norm()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use trieq_core::{BiquadState, db_to_linear, high_shelf, low_shelf, peaking};

    const SR: f32 = 48000.0;

    #[test]
    fn test_log_spaced_endpoints() {
        let f = log_spaced(20.0, 20000.0, 31);
        assert_eq!(f.len(), 31);
        assert!((f[0] - 20.0).abs() < 1e-3);
        assert!((f[30] - 20000.0).abs() < 1.0);
        assert!(f.windows(2).all(|w| w[1] > w[0]));
        assert!(log_spaced(20.0, 100.0, 0).is_empty());
    }

    #[test]
    fn test_cascade_adds_in_db() {
        let low = low_shelf(SR, 200.0, 0.7, db_to_linear(6.0));
        let peak = peaking(SR, 1000.0, 1.0, db_to_linear(3.0));
        let cascade = cascade_magnitude_db(&[low, peak], 1000.0, SR);
        let sum = low.magnitude_db(1000.0, SR) + peak.magnitude_db(1000.0, SR);
        assert!((cascade - sum).abs() < 1e-3);
    }

    #[test]
    fn test_measured_matches_analytic() {
        let coefficients = [
            low_shelf(SR, 150.0, 0.7, db_to_linear(4.0)),
            peaking(SR, 2000.0, 2.0, db_to_linear(-5.0)),
            high_shelf(SR, 8000.0, 0.7, db_to_linear(3.0)),
        ];
        let n = 8192;
        let mut states = [BiquadState::new(); 3];
        let ir: Vec<f32> = (0..n)
            .map(|i| {
                let mut y = if i == 0 { 1.0 } else { 0.0 };
                for (state, c) in states.iter_mut().zip(&coefficients) {
                    y = state.process(c, y);
                }
                y
            })
            .collect();

        let measured = measured_response(&ir, SR, n);
        for point in measured.iter().skip(4).step_by(97) {
            let analytic = cascade_magnitude_db(&coefficients, point.frequency, SR);
            assert!(
                (point.magnitude_db - analytic).abs() < 0.05,
                "{} Hz: measured {}, analytic {}",
                point.frequency,
                point.magnitude_db,
                analytic
            );
        }
    }
}
