//! Per-band signal energy from an averaged power spectrum (Welch's method).
//!
//! The spectrum is normalized so that summing every bin gives the mean
//! square of the signal. A band's mean square is then the sum of its bins,
//! and its RMS follows directly; all bands together add up to the total.

use crate::fft::{Fft, hann};

/// Default analysis frame length.
pub const DEFAULT_FFT_SIZE: usize = 4096;

/// Averaged one-sided power spectrum, normalized to mean square per bin.
///
/// Frames of `fft_size` samples overlap by half and are Hann-windowed. A
/// signal shorter than one frame is zero-padded, which scales every bin down
/// by the padding ratio.
pub fn power_spectrum(signal: &[f32], fft_size: usize) -> Vec<f32> {
    let fft = Fft::new(fft_size);
    let coefficients = hann(fft_size);
    let norm = fft_size as f32 * coefficients.iter().map(|w| w * w).sum::<f32>();
    let hop = (fft_size / 2).max(1);

    let mut power = vec![0.0_f32; fft.num_bins()];
    let mut frames = 0usize;
    let mut start = 0usize;
    loop {
        let end = (start + fft_size).min(signal.len());
        let mut frame: Vec<f32> = signal[start..end].to_vec();
        frame.resize(fft_size, 0.0);
        for (s, w) in frame.iter_mut().zip(&coefficients) {
            *s *= w;
        }

        let spectrum = fft.forward(&frame);
        let last = spectrum.len() - 1;
        for (bin, (p, c)) in power.iter_mut().zip(&spectrum).enumerate() {
            // Interior bins stand for both the positive and negative frequency.
            let scale = if bin == 0 || (bin == last && fft_size % 2 == 0) {
                1.0
            } else {
                2.0
            };
            *p += scale * c.norm_sqr() / norm;
        }
        frames += 1;

        start += hop;
        if start + fft_size > signal.len() {
            break;
        }
    }

    for p in &mut power {
        *p /= frames as f32;
    }
    power
}

/// Energy of one frequency band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandLevel {
    /// Lower edge in Hz (inclusive).
    pub low_hz: f32,
    /// Upper edge in Hz (exclusive, except the last band which includes Nyquist).
    pub high_hz: f32,
    /// Mean square of the signal content in this band.
    pub mean_square: f32,
}

impl BandLevel {
    /// RMS of the band content.
    pub fn rms(&self) -> f32 {
        self.mean_square.sqrt()
    }

    /// RMS of the band content in dB. Silence floors at -200 dB.
    pub fn rms_db(&self) -> f32 {
        10.0 * self.mean_square.max(1e-20).log10()
    }
}

/// Splits `signal` into bands at the `splits` frequencies and measures each.
///
/// With splits `[200, 6000]` the bands are `[0, 200)`, `[200, 6000)`, and
/// `[6000, Nyquist]`. Splits are sorted and those outside `(0, Nyquist)`
/// dropped.
///
/// # Example
///
/// ```rust
/// use trieq_analysis::{band_levels, signal::white_noise};
///
/// let noise = white_noise(48000, 0.5, 7);
/// let bands = band_levels(&noise, 48000.0, &[1000.0], 2048);
/// assert_eq!(bands.len(), 2);
/// assert!(bands[1].mean_square > bands[0].mean_square);
/// ```
pub fn band_levels(
    signal: &[f32],
    sample_rate: f32,
    splits: &[f32],
    fft_size: usize,
) -> Vec<BandLevel> {
    let nyquist = sample_rate / 2.0;
    let mut edges: Vec<f32> = splits
        .iter()
        .copied()
        .filter(|&f| f > 0.0 && f < nyquist)
        .collect();
    edges.sort_by(f32::total_cmp);
    edges.dedup();
    edges.insert(0, 0.0);
    edges.push(nyquist);

    let power = power_spectrum(signal, fft_size);
    let bin_width = sample_rate / fft_size as f32;

    let mut bands: Vec<BandLevel> = edges
        .windows(2)
        .map(|pair| BandLevel {
            low_hz: pair[0],
            high_hz: pair[1],
            mean_square: 0.0,
        })
        .collect();

    for (bin, &p) in power.iter().enumerate() {
        let freq = bin as f32 * bin_width;
        let index = bands
            .iter()
            .position(|b| freq < b.high_hz)
            .unwrap_or(bands.len() - 1);
        bands[index].mean_square += p;
    }
    bands
}

/// Mean square of `signal` content between `low_hz` and `high_hz`.
pub fn band_energy(signal: &[f32], sample_rate: f32, low_hz: f32, high_hz: f32) -> f32 {
    let power = power_spectrum(signal, DEFAULT_FFT_SIZE);
    let bin_width = sample_rate / DEFAULT_FFT_SIZE as f32;
    power
        .iter()
        .enumerate()
        .filter(|(bin, _)| {
            let freq = *bin as f32 * bin_width;
            freq >= low_hz && freq < high_hz
        })
        .map(|(_, &p)| p)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::rms;
    use crate::signal::{sine, white_noise};

    #[test]
    fn test_bands_sum_to_total() {
        let noise = white_noise(48000, 0.5, 1);
        let bands = band_levels(&noise, 48000.0, &[500.0, 5000.0], 4096);
        assert_eq!(bands.len(), 3);

        let total: f32 = bands.iter().map(|b| b.mean_square).sum();
        let expected = rms(&noise).powi(2);
        assert!(
            (total - expected).abs() / expected < 0.05,
            "total {total}, expected {expected}"
        );
    }

    #[test]
    fn test_sine_lands_in_its_band() {
        let tone = sine(1000.0, 48000.0, 48000, 1.0);
        let bands = band_levels(&tone, 48000.0, &[500.0, 2000.0], 4096);
        assert!(bands[1].mean_square > 100.0 * bands[0].mean_square);
        assert!(bands[1].mean_square > 100.0 * bands[2].mean_square);
        // Sine of amplitude 1 has mean square 0.5.
        assert!((bands[1].mean_square - 0.5).abs() < 0.02);
    }

    #[test]
    fn test_splits_are_sanitized() {
        let noise = white_noise(8192, 0.5, 3);
        let bands = band_levels(&noise, 48000.0, &[30000.0, 1000.0, -5.0, 1000.0], 1024);
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].high_hz, 1000.0);
        assert_eq!(bands[1].high_hz, 24000.0);
    }

    #[test]
    fn test_short_signal_single_frame() {
        let noise = white_noise(100, 0.5, 9);
        let power = power_spectrum(&noise, 256);
        assert_eq!(power.len(), 129);
        assert!(power.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_band_energy() {
        let tone = sine(3000.0, 48000.0, 48000, 1.0);
        let inside = band_energy(&tone, 48000.0, 2000.0, 4000.0);
        let outside = band_energy(&tone, 48000.0, 6000.0, 20000.0);
        assert!(inside > 1000.0 * outside);
    }
}
