//! Settings file for trieq processing runs.
//!
//! A settings file holds the seven equalizer parameters under `[eq]` and the
//! offline processing options under `[processing]`:
//!
//! ```toml
//! [eq]
//! low_freq = 100.0
//! low_gain = 6.0
//! mid_q = 1.0
//! high_gain = -6.0
//!
//! [processing]
//! block_size = 512
//! bit_depth = 32
//! sanitize_output = false
//! ```
//!
//! Missing keys take defaults. Values are range-checked on load; unknown
//! parameter IDs are rejected rather than ignored.
//!
//! # Example
//!
//! ```rust,no_run
//! use trieq_config::{EqSettings, paths};
//!
//! let mut settings = EqSettings::load_or_default(paths::default_settings_path()).unwrap();
//! settings.apply_assignment("mid_gain=3.0").unwrap();
//! let params = settings.params().unwrap();
//! # let _ = params;
//! ```

mod error;
mod settings;

/// Platform-specific location of the settings file.
pub mod paths;

pub use error::ConfigError;
pub use paths::{default_settings_path, user_config_dir};
pub use settings::{EqSettings, MAX_BLOCK_SIZE, ProcessingSettings, parse_assignment};
