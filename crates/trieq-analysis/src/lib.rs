//! trieq Analysis - measurement tools for the equalizer
//!
//! - [`fft`] - FFT wrapper and Hann window
//! - [`bands`] - Per-band energy from an averaged power spectrum
//! - [`response`] - Analytic and measured frequency response of biquad cascades
//! - [`dynamics`] - RMS and peak levels
//! - [`signal`] - Deterministic test signals (noise, sine, impulse)
//!
//! ## Example
//!
//! ```rust
//! use trieq_analysis::{band_levels, signal::white_noise};
//!
//! let noise = white_noise(44100, 0.5, 1);
//! for band in band_levels(&noise, 44100.0, &[200.0, 6000.0], 4096) {
//!     println!("{:>7.0}-{:<7.0} Hz {:6.1} dB", band.low_hz, band.high_hz, band.rms_db());
//! }
//! ```

pub mod bands;
pub mod dynamics;
pub mod fft;
pub mod response;
pub mod signal;

pub use bands::{BandLevel, DEFAULT_FFT_SIZE, band_energy, band_levels, power_spectrum};
pub use dynamics::{peak, peak_db, rms, rms_db};
pub use fft::{Fft, hann};
pub use response::{
    ResponsePoint, cascade_magnitude_db, cascade_response, log_spaced, measured_response,
};
pub use signal::{NoiseGenerator, impulse, sine, white_noise};
