//! Deterministic test signals.

use std::f32::consts::PI;

/// Xorshift32 white-noise source.
///
/// Deterministic for a given seed, so generated files and test fixtures are
/// reproducible.
#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    state: u32,
}

impl NoiseGenerator {
    /// Creates a generator. A zero seed would lock xorshift at zero, so it is
    /// replaced with a fixed non-zero value.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x1234_5678 } else { seed },
        }
    }

    /// Next sample, uniform in `[-1, 1]`.
    pub fn next_sample(&mut self) -> f32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        (x as f32 / u32::MAX as f32) * 2.0 - 1.0
    }
}

/// Uniform white noise with peak `amplitude`.
pub fn white_noise(num_samples: usize, amplitude: f32, seed: u32) -> Vec<f32> {
    let mut generator = NoiseGenerator::new(seed);
    (0..num_samples)
        .map(|_| generator.next_sample() * amplitude)
        .collect()
}

/// Sine tone starting at phase zero.
pub fn sine(freq_hz: f32, sample_rate: f32, num_samples: usize, amplitude: f32) -> Vec<f32> {
    (0..num_samples)
        .map(|i| amplitude * (2.0 * PI * freq_hz * i as f32 / sample_rate).sin())
        .collect()
}

/// Unit impulse scaled by `amplitude` at sample zero.
pub fn impulse(num_samples: usize, amplitude: f32) -> Vec<f32> {
    let mut samples = vec![0.0; num_samples];
    if let Some(first) = samples.first_mut() {
        *first = amplitude;
    }
    samples
}
