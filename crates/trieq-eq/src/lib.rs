//! trieq EQ - three-band parametric equalizer
//!
//! A fixed chain of three biquad bands applied in series to every channel:
//!
//! 1. [`BandRole::Low`] - low shelf, Q fixed at [`SHELF_Q`]
//! 2. [`BandRole::Mid`] - peaking filter with user Q
//! 3. [`BandRole::High`] - high shelf, Q fixed at [`SHELF_Q`]
//!
//! [`ThreeBandEq`] owns the bands and the per-channel filter state.
//! [`EqParams`] carries the seven user parameters; [`SharedParams`] moves them
//! from a control thread to the audio thread without locks.
//!
//! # Example
//!
//! ```rust
//! use trieq_core::ProcessSpec;
//! use trieq_eq::{SharedParams, ThreeBandEq, params};
//!
//! let shared = SharedParams::default();
//! let mut eq = ThreeBandEq::new();
//! eq.prepare(ProcessSpec::new(44100.0, 512, 2));
//!
//! // Control thread
//! shared.set(params::LOW_GAIN, 6.0);
//!
//! // Audio thread
//! let mut left = [0.0_f32; 512];
//! let mut right = [0.0_f32; 512];
//! eq.process_shared(&shared, &mut [&mut left[..], &mut right[..]]);
//! assert_eq!(eq.params().low_gain, 6.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod band;
pub mod chain;
pub mod params;
pub mod shared;

pub use band::{Band, BandRole, SHELF_Q};
pub use chain::{ChainState, ThreeBandEq};
pub use params::{EqParams, PARAM_COUNT, PARAM_DESCRIPTORS};
pub use shared::SharedParams;
