//! Settings resolution shared by `process` and `response`.

use std::path::Path;
use trieq_config::{EqSettings, default_settings_path, parse_assignment};

/// Parses a `--param id=value` argument.
pub fn parse_param(s: &str) -> Result<(String, f32), String> {
    parse_assignment(s).map_err(|e| e.to_string())
}

/// Loads settings from `path` (or the user settings file, if one exists)
/// and applies `--param` overrides on top.
pub fn resolve_settings(
    path: Option<&Path>,
    overrides: &[(String, f32)],
) -> anyhow::Result<EqSettings> {
    let mut settings = match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading settings");
            EqSettings::load(path)?
        }
        None => {
            let default_path = default_settings_path();
            if default_path.exists() {
                tracing::info!(path = %default_path.display(), "loading user settings");
            }
            EqSettings::load_or_default(&default_path)?
        }
    };

    for (id, value) in overrides {
        settings.set_param(id, *value)?;
    }
    Ok(settings)
}
