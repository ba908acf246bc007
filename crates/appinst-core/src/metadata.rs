//! Install-time metadata left behind by a bundling installer.
//!
//! When a product installer bundled this tool, it records the product's
//! full name and the properties the user chose (such as `ALLUSERS`) in a
//! small JSON document:
//!
//! ```json
//! { "full_name": "EPD-7.1", "properties": { "ALLUSERS": "1" } }
//! ```
//!
//! The dispatcher takes this as an optional dependency; its absence is the
//! normal case for a plain runtime install.

use crate::config::AppConfig;
use crate::error::{AppinstError, Result};
use crate::platform;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallerMetadata {
    /// Product name and version, e.g. `EPD-7.1`.
    pub full_name: String,
    /// Properties recorded by the installer.
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl InstallerMetadata {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            properties: HashMap::new(),
        }
    }

    /// Set an installer property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Look up an installer property.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Whether the user chose a system-wide install.
    pub fn all_users(&self) -> bool {
        self.get(AppConfig::ALL_USERS_PROPERTY) == Some("1")
    }

    /// Load metadata from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| AppinstError::io_with_path(e, path))?;
        let metadata: Self = serde_json::from_str(&content)?;
        if metadata.full_name.trim().is_empty() {
            return Err(AppinstError::Config {
                message: format!("Installer metadata at {} has an empty full_name", path.display()),
            });
        }
        debug!("Loaded installer metadata for {}", metadata.full_name);
        Ok(metadata)
    }

    /// Find and load metadata, if any.
    ///
    /// Lookup order: `explicit`, then `$APPINST_METADATA`, then the file in
    /// the appinst config directory. An explicitly named file must exist;
    /// the implicit locations are skipped when absent.
    pub fn discover(explicit: Option<&Path>) -> Result<Option<Self>> {
        if let Some(path) = explicit {
            return Self::load(path).map(Some);
        }

        if let Some(path) = std::env::var_os(AppConfig::METADATA_ENV_VAR) {
            return Self::load(Path::new(&path)).map(Some);
        }

        match platform::metadata_path() {
            Ok(path) => Self::load_if_exists(&path),
            Err(e) => {
                debug!("No config directory for installer metadata: {}", e);
                Ok(None)
            }
        }
    }

    fn load_if_exists(path: &Path) -> Result<Option<Self>> {
        if path.exists() {
            Self::load(path).map(Some)
        } else {
            debug!("No installer metadata at {:?}", path);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_all_users_flag() {
        assert!(!InstallerMetadata::new("EPD-7.1").all_users());
        assert!(InstallerMetadata::new("EPD-7.1")
            .with_property("ALLUSERS", "1")
            .all_users());
        assert!(!InstallerMetadata::new("EPD-7.1")
            .with_property("ALLUSERS", "0")
            .all_users());
    }

    #[test]
    fn test_load_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("installer.json");
        fs::write(
            &path,
            r#"{"full_name": "EPD-7.1", "properties": {"ALLUSERS": "1"}}"#,
        )
        .unwrap();

        let metadata = InstallerMetadata::load(&path).unwrap();
        assert_eq!(metadata.full_name, "EPD-7.1");
        assert!(metadata.all_users());
    }

    #[test]
    fn test_load_rejects_empty_name() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("installer.json");
        fs::write(&path, r#"{"full_name": "  "}"#).unwrap();

        assert!(matches!(
            InstallerMetadata::load(&path),
            Err(AppinstError::Config { .. })
        ));
    }

    #[test]
    fn test_discover_explicit_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.json");
        assert!(InstallerMetadata::discover(Some(&missing)).is_err());
    }

    #[test]
    fn test_load_if_exists_skips_missing() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("installer.json");
        assert_eq!(InstallerMetadata::load_if_exists(&missing).unwrap(), None);
    }
}
