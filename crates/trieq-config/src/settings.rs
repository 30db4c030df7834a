//! The settings file for one processing run.

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use trieq_eq::params::{descriptor, index_of};
use trieq_eq::{EqParams, PARAM_DESCRIPTORS};
use trieq_io::{DEFAULT_BLOCK_SIZE, SUPPORTED_BIT_DEPTHS};

/// Largest block size accepted in `[processing]`.
pub const MAX_BLOCK_SIZE: usize = 65536;

/// Equalizer parameters and processing options, as stored in `trieq.toml`.
///
/// Keys under `[eq]` are parameter string IDs (`low_freq`, `mid_q`, ...).
/// Missing keys take the parameter's default; missing `[processing]` keys
/// take the values of [`ProcessingSettings::default`].
///
/// # Example
///
/// ```rust
/// use trieq_config::EqSettings;
///
/// let settings = EqSettings::from_toml(
///     r#"
///     [eq]
///     low_gain = 6.0
///
///     [processing]
///     bit_depth = 24
///     "#,
/// )
/// .unwrap();
///
/// let params = settings.params().unwrap();
/// assert_eq!(params.low_gain, 6.0);
/// assert_eq!(params.low_freq, 200.0);
/// assert_eq!(settings.processing.block_size, 512);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EqSettings {
    /// Parameter values keyed by string ID.
    #[serde(default)]
    pub eq: BTreeMap<String, f32>,

    /// Offline processing options.
    #[serde(default)]
    pub processing: ProcessingSettings,
}

/// Options for offline file processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingSettings {
    /// Samples per channel per processed block.
    pub block_size: usize,
    /// Output WAV bit depth (16, 24, or 32).
    pub bit_depth: u16,
    /// Replace non-finite output samples with silence.
    pub sanitize_output: bool,
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            bit_depth: 32,
            sanitize_output: false,
        }
    }
}

impl ProcessingSettings {
    /// Checks block size and bit depth.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(ConfigError::InvalidProcessing {
                field: "block_size",
                reason: format!("must be between 1 and {MAX_BLOCK_SIZE}, got {}", self.block_size),
            });
        }
        if !SUPPORTED_BIT_DEPTHS.contains(&self.bit_depth) {
            return Err(ConfigError::InvalidProcessing {
                field: "bit_depth",
                reason: format!(
                    "unsupported bit depth {} (expected one of {:?})",
                    self.bit_depth, SUPPORTED_BIT_DEPTHS
                ),
            });
        }
        Ok(())
    }
}

impl EqSettings {
    /// Settings with every parameter written out explicitly.
    pub fn from_params(params: &EqParams) -> Self {
        let eq = PARAM_DESCRIPTORS
            .iter()
            .zip(params.to_values())
            .map(|(d, value)| (d.string_id.to_string(), value))
            .collect();
        Self {
            eq,
            processing: ProcessingSettings::default(),
        }
    }

    /// Resolves `[eq]` into a full parameter set.
    pub fn params(&self) -> Result<EqParams, ConfigError> {
        let mut params = EqParams::default();
        for (id, &value) in &self.eq {
            let index = checked_index(id, value)?;
            params.set(index, value);
        }
        Ok(params)
    }

    /// Sets one parameter by string ID after range-checking it.
    pub fn set_param(&mut self, id: &str, value: f32) -> Result<(), ConfigError> {
        checked_index(id, value)?;
        self.eq.insert(id.to_string(), value);
        Ok(())
    }

    /// Applies an `id=value` assignment, as given to `--param`.
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<(), ConfigError> {
        let (id, value) = parse_assignment(assignment)?;
        self.set_param(&id, value)
    }

    /// Checks every parameter and processing option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params()?;
        self.processing.validate()
    }

    /// Load and validate settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load settings from `path`, or defaults if the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(toml_str)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Convert the settings to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save the settings to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }
}

/// Splits `id=value` into a parameter ID and a number.
///
/// ```rust
/// use trieq_config::parse_assignment;
///
/// assert_eq!(parse_assignment("mid_q=2.5").unwrap(), ("mid_q".to_string(), 2.5));
/// assert!(parse_assignment("mid_q").is_err());
/// ```
pub fn parse_assignment(assignment: &str) -> Result<(String, f32), ConfigError> {
    let invalid = || ConfigError::InvalidAssignment(assignment.to_string());
    let (id, value) = assignment.split_once('=').ok_or_else(invalid)?;
    let id = id.trim();
    if id.is_empty() {
        return Err(invalid());
    }
    let value: f32 = value.trim().parse().map_err(|_| invalid())?;
    Ok((id.to_string(), value))
}

fn checked_index(id: &str, value: f32) -> Result<usize, ConfigError> {
    let index = index_of(id).ok_or_else(|| ConfigError::UnknownParameter(id.to_string()))?;
    let Some(desc) = descriptor(index) else {
        return Err(ConfigError::UnknownParameter(id.to_string()));
    };
    if !value.is_finite() {
        return Err(ConfigError::InvalidParameter {
            param: id.to_string(),
            value,
            reason: "not a finite number".to_string(),
        });
    }
    if !desc.contains(value) {
        return Err(ConfigError::InvalidParameter {
            param: id.to_string(),
            value,
            reason: format!("outside {}..={}{}", desc.min, desc.max, desc.unit.suffix()),
        });
    }
    Ok(index)
}
