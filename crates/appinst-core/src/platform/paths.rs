//! Platform-specific path utilities.

use crate::config::AppConfig;
use crate::error::{AppinstError, Result};
use std::path::PathBuf;

/// Get the appinst configuration directory.
///
/// # Platform Behavior
/// - **Linux**: `~/.config/appinst` (XDG_CONFIG_HOME)
/// - **Windows**: `%APPDATA%\appinst`
/// - **macOS**: `~/Library/Application Support/appinst`
pub fn appinst_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| AppinstError::Config {
        message: "Could not determine platform config directory".to_string(),
    })?;
    Ok(config_dir.join(AppConfig::APP_CONFIG_DIR_NAME))
}

/// Default location of the installer metadata file.
pub fn metadata_path() -> Result<PathBuf> {
    Ok(appinst_config_dir()?.join(AppConfig::METADATA_FILENAME))
}

/// Default location of the platform helper table.
pub fn helpers_path() -> Result<PathBuf> {
    Ok(appinst_config_dir()?.join(AppConfig::HELPERS_FILENAME))
}
