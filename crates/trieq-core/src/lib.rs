//! trieq core - DSP primitives for the three-band equalizer
//!
//! This crate holds the pieces of the equalizer that do not depend on band
//! layout: biquad coefficient designs, per-channel filter state, level math,
//! and the parameter and lifecycle traits processors implement.
//!
//! # Filters
//!
//! - [`BiquadCoefficients`] - normalized taps, computed purely from parameters
//! - [`BiquadState`] - Direct Form I registers for one channel
//! - [`Biquad`] - single-channel convenience wrapper
//! - [`low_shelf`], [`peaking`], [`high_shelf`] - RBJ cookbook designs
//!
//! # Parameters and lifecycle
//!
//! - [`ParameterInfo`] / [`ParamDescriptor`] - indexed parameter introspection
//! - [`Processor`] / [`ProcessSpec`] - prepare / process / reset / release
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! trieq-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use trieq_core::{BiquadState, db_to_linear, low_shelf};
//!
//! let coefficients = low_shelf(48000.0, 120.0, 0.7, db_to_linear(4.0));
//! let mut state = BiquadState::new();
//! let mut block = [0.0_f32; 64];
//! block[0] = 1.0;
//! for sample in block.iter_mut() {
//!     *sample = state.process(&coefficients, *sample);
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod math;
pub mod param_info;
pub mod processor;

pub use biquad::{
    Biquad, BiquadCoefficients, BiquadState, MAX_FREQUENCY_RATIO, MIN_FREQUENCY_HZ,
    MIN_LINEAR_GAIN, MIN_Q, clamp_frequency, clamp_q, high_shelf, low_shelf, peaking,
};
pub use math::{db_to_linear, flush_denormal, hz_to_omega, linear_to_db, sanitize};
pub use param_info::{ParamDescriptor, ParamId, ParamUnit, ParameterInfo};
pub use processor::{ProcessSpec, Processor};
