//! Platform-independent menu and shortcut descriptions.
//!
//! These are transient request structures. They are validated only as far as
//! the dispatcher needs and are otherwise passed through untouched to the
//! platform installer.

use crate::error::{AppinstError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A menu to add to, or merge into, the OS application menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDescription {
    /// Resource identifier (e.g. the `.directory` file name on Linux).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category used to locate shortcuts within this menu.
    ///
    /// Installers make categories unique by joining them with `.` down the
    /// hierarchy, so `Abc` containing `Def` yields `Abc.Def`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Nested menus.
    #[serde(
        default,
        rename = "sub-menus",
        alias = "sub_menus",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sub_menus: Vec<MenuDescription>,
}

impl MenuDescription {
    /// Create a menu whose id and name are the same string.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            category: None,
            sub_menus: Vec::new(),
        }
    }

    /// The category of this menu, falling back to its id.
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(&self.id)
    }
}

/// Platform-dependent commands that may stand in for the executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandToken {
    /// Remaining arguments are paths to open in the file system explorer.
    FileBrowser,
    /// Remaining arguments are opened in the default web browser.
    WebBrowser,
}

impl CommandToken {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandToken::FileBrowser => "{{FILEBROWSER}}",
            CommandToken::WebBrowser => "{{WEBBROWSER}}",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "{{FILEBROWSER}}" => Some(CommandToken::FileBrowser),
            "{{WEBBROWSER}}" => Some(CommandToken::WebBrowser),
            _ => None,
        }
    }
}

/// A launchable entry placed into one or more menu categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutDescription {
    /// Resource identifier (e.g. the `.desktop` file name on Linux).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Full menu categories this shortcut appears in.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Executable followed by its arguments.
    #[serde(default)]
    pub cmd: Vec<String>,
    /// Fly-over help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Path to an icon file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<PathBuf>,
    /// Run inside a terminal.
    #[serde(default)]
    pub terminal: bool,
}

impl ShortcutDescription {
    /// Create a shortcut with the given name and command.
    pub fn new(name: impl Into<String>, cmd: Vec<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            categories: Vec::new(),
            cmd,
            comment: None,
            icon: None,
            terminal: false,
        }
    }

    /// The resource id, defaulting to the display name.
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    /// The special token in the executable position, if any.
    pub fn command_token(&self) -> Option<CommandToken> {
        self.cmd.first().and_then(|c| CommandToken::parse(c))
    }
}

/// Scope of an installation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallMode {
    /// Current user only.
    #[default]
    User,
    /// System-wide.
    System,
}

impl InstallMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallMode::User => "user",
            InstallMode::System => "system",
        }
    }
}

impl FromStr for InstallMode {
    type Err = AppinstError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(InstallMode::User),
            "system" => Ok(InstallMode::System),
            other => Err(AppinstError::invalid_argument(
                "install_mode",
                format!("expected 'user' or 'system', got '{}'", other),
            )),
        }
    }
}

impl fmt::Display for InstallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A manifest file listing the menus and shortcuts to install.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallManifest {
    #[serde(default)]
    pub menus: Vec<MenuDescription>,
    #[serde(default)]
    pub shortcuts: Vec<ShortcutDescription>,
}

impl InstallManifest {
    /// Load a manifest from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| AppinstError::io_with_path(e, path))?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_menu_category_falls_back_to_id() {
        let mut menu = MenuDescription::named("Tools");
        assert_eq!(menu.category(), "Tools");

        menu.category = Some("Dev".into());
        assert_eq!(menu.category(), "Dev");
    }

    #[test]
    fn test_menu_parses_sub_menus_key() {
        let menu: MenuDescription = serde_json::from_value(json!({
            "id": "Enthought",
            "name": "Enthought",
            "sub-menus": [{"id": "Docs", "name": "Documentation", "category": "Docs"}]
        }))
        .unwrap();

        assert_eq!(menu.sub_menus.len(), 1);
        assert_eq!(menu.sub_menus[0].category(), "Docs");
    }

    #[test]
    fn test_shortcut_id_defaults_to_name() {
        let mut sc = ShortcutDescription::new("IPython", vec!["ipython".into()]);
        assert_eq!(sc.id(), "IPython");

        sc.id = Some("ipython-shell".into());
        assert_eq!(sc.id(), "ipython-shell");
    }

    #[test]
    fn test_shortcut_command_token() {
        let sc = ShortcutDescription::new(
            "Docs",
            vec!["{{WEBBROWSER}}".into(), "https://example.com".into()],
        );
        assert_eq!(sc.command_token(), Some(CommandToken::WebBrowser));

        let plain = ShortcutDescription::new("Shell", vec!["bash".into()]);
        assert_eq!(plain.command_token(), None);

        let empty = ShortcutDescription::new("Nothing", Vec::new());
        assert_eq!(empty.command_token(), None);
    }

    #[test]
    fn test_install_mode_parse() {
        assert_eq!("user".parse::<InstallMode>().unwrap(), InstallMode::User);
        assert_eq!("system".parse::<InstallMode>().unwrap(), InstallMode::System);

        for bad in ["", "User", "global", "all"] {
            let err = bad.parse::<InstallMode>().unwrap_err();
            assert!(matches!(err, AppinstError::InvalidArgument { .. }), "{bad}");
        }
    }

    #[test]
    fn test_manifest_load() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("menus.json");
        std::fs::write(
            &path,
            r#"{"shortcuts": [{"name": "Shell", "cmd": ["bash"], "terminal": true}]}"#,
        )
        .unwrap();

        let manifest = InstallManifest::load(&path).unwrap();
        assert!(manifest.menus.is_empty());
        assert_eq!(manifest.shortcuts.len(), 1);
        assert!(manifest.shortcuts[0].terminal);
    }

    #[test]
    fn test_manifest_load_missing_file() {
        let err = InstallManifest::load(Path::new("/nonexistent/menus.json")).unwrap_err();
        assert!(matches!(err, AppinstError::Io { path: Some(_), .. }));
    }
}
