//! Platform-specific location of the settings file.
//!
//! - Linux: `~/.config/trieq/trieq.toml`
//! - macOS: `~/Library/Application Support/trieq/trieq.toml`
//! - Windows: `%APPDATA%\trieq\trieq.toml`

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "trieq";

/// File name of the settings file inside [`user_config_dir`].
pub const SETTINGS_FILE_NAME: &str = "trieq.toml";

/// Returns the user-specific configuration directory.
///
/// Falls back to the current directory if the platform config directory
/// cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the default settings file path.
pub fn default_settings_path() -> PathBuf {
    user_config_dir().join(SETTINGS_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_dir_ends_with_app_name() {
        assert!(user_config_dir().ends_with(APP_NAME));
    }

    #[test]
    fn settings_path_is_inside_config_dir() {
        let path = default_settings_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("trieq.toml"));
        assert_eq!(path.parent(), Some(user_config_dir().as_path()));
    }
}
