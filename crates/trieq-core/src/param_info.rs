//! Parameter introspection for discoverable processor parameters.
//!
//! [`ParameterInfo`] exposes a processor's parameters by index so a host
//! layer (CLI flags, a settings file, a plugin wrapper) can enumerate,
//! read, and write them without knowing the concrete type. Each parameter is
//! described by a [`ParamDescriptor`] carrying display metadata, its valid
//! range, and stable identifiers:
//!
//! - [`ParamId`] - stable numeric ID for automation and state restore
//! - `string_id` - stable textual ID (`"low_freq"`), used as the settings key
//!
//! # Example
//!
//! ```rust
//! use trieq_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct Trim {
//!     gain_db: f32,
//! }
//!
//! impl ParameterInfo for Trim {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::gain_db("Trim", "Trim", -24.0, 24.0, 0.0)
//!                 .with_id(ParamId(1), "trim")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.gain_db,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if let Some(desc) = self.param_info(index) {
//!             self.gain_db = desc.clamp(value);
//!         }
//!     }
//! }
//!
//! let mut trim = Trim { gain_db: 0.0 };
//! trim.set_param(0, 40.0);
//! assert_eq!(trim.get_param(0), 24.0);
//! assert_eq!(trim.find_param_by_string_id("trim"), Some(0));
//! ```

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Trait for processors that expose introspectable parameters.
///
/// Parameters are accessed by zero-based index, stable for the lifetime of
/// the instance. `set_param` implementations clamp to the descriptor range and
/// ignore out-of-range indices; `get_param` returns `0.0` for them.
///
/// This trait does not require thread safety. Cross-thread parameter access
/// goes through a dedicated lock-free store instead.
pub trait ParameterInfo {
    /// Returns the number of parameters. Valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Returns the descriptor for the parameter at `index`, or `None` if out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Gets the current value of the parameter at `index`.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the value of the parameter at `index`, clamped to its range.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by display name or short name (case-insensitive).
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name) || desc.short_name.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Find a parameter index by its stable string ID (exact match).
    fn find_param_by_string_id(&self, string_id: &str) -> Option<usize> {
        (0..self.param_count())
            .find(|&i| self.param_info(i).is_some_and(|d| d.string_id == string_id))
    }
}

/// Describes a single parameter's metadata for display and validation.
///
/// `short_name` should be 8 characters or less so it fits narrow displays
/// and table columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Low Frequency").
    pub name: &'static str,

    /// Short name, max 8 characters (e.g., "LowFreq").
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value.
    pub min: f32,

    /// Maximum allowed value.
    pub max: f32,

    /// Value on construction and after a reset to defaults.
    pub default: f32,

    /// Stable numeric ID. Default: `ParamId(0)` (unassigned).
    pub id: ParamId,

    /// Stable textual ID used as the settings-file key. Default: `""`.
    pub string_id: &'static str,
}

impl ParamDescriptor {
    /// Frequency parameter in Hz.
    pub const fn frequency_hz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Hertz,
            min,
            max,
            default,
            id: ParamId(0),
            string_id: "",
        }
    }

    /// Gain parameter in decibels.
    pub const fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Decibels,
            min,
            max,
            default,
            id: ParamId(0),
            string_id: "",
        }
    }

    /// Dimensionless quality factor.
    pub const fn q_factor(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
            id: ParamId(0),
            string_id: "",
        }
    }

    /// Sets the stable numeric and string IDs.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Clamps a value to this parameter's valid range. NaN maps to the default.
    ///
    /// ```rust
    /// use trieq_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::gain_db("Gain", "Gain", -24.0, 24.0, 0.0);
    /// assert_eq!(desc.clamp(3.0), 3.0);
    /// assert_eq!(desc.clamp(-100.0), -24.0);
    /// assert_eq!(desc.clamp(f32::NAN), 0.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Returns `true` if `value` lies within `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels (dB).
    Decibels,

    /// Hertz (Hz).
    Hertz,

    /// No unit, e.g. Q.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use trieq_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Decibels.suffix(), " dB");
    /// assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::None => "",
        }
    }
}
