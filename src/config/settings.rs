//! Settings entry point for the project.

use folio_conf::{Settings, SettingsError};
use std::path::PathBuf;

/// Environment variable naming the directory with `base.toml` and the
/// profile files.
pub const SETTINGS_DIR_VAR: &str = "FOLIO_SETTINGS_DIR";

/// Directory holding the TOML settings files.
///
/// Defaults to `settings/` under the working directory.
pub fn settings_dir() -> PathBuf {
	std::env::var_os(SETTINGS_DIR_VAR)
		.map(PathBuf::from)
		.unwrap_or_else(|| PathBuf::from("settings"))
}

/// Load and validate settings for the active profile.
pub fn get_settings() -> Result<Settings, SettingsError> {
	Settings::load(settings_dir())
}
