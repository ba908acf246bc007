//! External helper programs as platform installers.
//!
//! The helper receives one [`InstallRequest`] as JSON on stdin and signals
//! failure with a non-zero exit status, optionally explaining on stderr.
//! Helpers may write to stderr at any point, including before they read
//! the request.

use super::{InstallRequest, PlatformInstaller};
use crate::error::{AppinstError, Result};
use crate::platform::PlatformId;
use crate::types::{InstallMode, MenuDescription, ShortcutDescription};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, info, warn};

/// How to invoke a helper program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperCommand {
    /// Executable path or name on `PATH`.
    pub program: PathBuf,
    /// Arguments passed before the request is written to stdin.
    #[serde(default)]
    pub args: Vec<String>,
}

/// Helper programs keyed by platform token.
///
/// ```json
/// { "linux2": { "program": "/opt/appinst/bin/xdg-menus" },
///   "win32":  { "program": "appinst-win32.exe", "args": ["--quiet"] } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HelperConfig {
    pub helpers: BTreeMap<PlatformId, HelperCommand>,
}

impl HelperConfig {
    /// Load the helper table from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| AppinstError::io_with_path(e, path))?;
        serde_json::from_str(&content).map_err(|e| AppinstError::Config {
            message: format!("Invalid helper config {}: {}", path.display(), e),
        })
    }

    pub fn get(&self, platform: PlatformId) -> Option<&HelperCommand> {
        self.helpers.get(&platform)
    }

    /// Build one installer per configured platform.
    pub fn installers(&self) -> Vec<CommandInstaller> {
        self.helpers
            .iter()
            .map(|(platform, command)| CommandInstaller::new(*platform, command.clone()))
            .collect()
    }
}

/// Platform installer backed by an external helper program.
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    platform: PlatformId,
    command: HelperCommand,
}

impl CommandInstaller {
    pub fn new(platform: PlatformId, command: HelperCommand) -> Self {
        Self { platform, command }
    }

    fn installer_error(&self, message: impl Into<String>) -> AppinstError {
        AppinstError::Installer {
            platform: self.platform.to_string(),
            message: message.into(),
        }
    }
}

impl PlatformInstaller for CommandInstaller {
    fn platform(&self) -> PlatformId {
        self.platform
    }

    fn install_application_menus(
        &self,
        menus: &[MenuDescription],
        shortcuts: &[ShortcutDescription],
        install_mode: InstallMode,
        uninstall: bool,
    ) -> Result<()> {
        let request = InstallRequest::new(self.platform, menus, shortcuts, install_mode, uninstall);
        let payload = request.to_json()?;

        debug!(
            "Running helper {:?} {:?} for {}",
            self.command.program, self.command.args, self.platform
        );

        let mut child = Command::new(&self.command.program)
            .args(&self.command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| AppinstError::io_with_path(e, &self.command.program))?;

        // stdin is fed from its own thread while stdout/stderr are drained
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(payload.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            (writer.join(), output)
        });

        match written {
            Ok(Ok(())) => {}
            // Helper exited without reading; its exit status tells the story
            Ok(Err(e)) if e.kind() == ErrorKind::BrokenPipe => {
                warn!("Helper for {} closed stdin early", self.platform);
            }
            Ok(Err(e)) => return Err(AppinstError::io_with_path(e, &self.command.program)),
            Err(_) => return Err(self.installer_error("stdin writer thread panicked")),
        }

        let output = output.map_err(|e| AppinstError::io_with_path(e, &self.command.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("helper exited with {}", output.status)
            } else {
                stderr
            };
            return Err(self.installer_error(message));
        }

        info!(
            "Helper for {} completed: {} menu(s), {} shortcut(s), mode={}, uninstall={}",
            self.platform,
            menus.len(),
            shortcuts.len(),
            install_mode,
            uninstall
        );

        Ok(())
    }
}
