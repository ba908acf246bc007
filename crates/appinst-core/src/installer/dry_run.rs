//! Reporting installer that performs no changes.

use super::{InstallRequest, PlatformInstaller};
use crate::error::{AppinstError, Result};
use crate::platform::PlatformId;
use crate::types::{InstallMode, MenuDescription, ShortcutDescription};
use std::io::{self, Write};
use std::sync::Mutex;
use tracing::info;

/// Writes each request as pretty JSON instead of installing it.
pub struct DryRunInstaller {
    platform: PlatformId,
    out: Mutex<Box<dyn Write + Send>>,
}

impl DryRunInstaller {
    pub fn new(platform: PlatformId, out: Box<dyn Write + Send>) -> Self {
        Self {
            platform,
            out: Mutex::new(out),
        }
    }

    /// Report to stdout.
    pub fn stdout(platform: PlatformId) -> Self {
        Self::new(platform, Box::new(io::stdout()))
    }
}

impl PlatformInstaller for DryRunInstaller {
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
        info!(
            "[DRY RUN] Would {} {} menu(s) and {} shortcut(s) for {} ({})",
            if uninstall { "uninstall" } else { "install" },
            menus.len(),
            shortcuts.len(),
            self.platform,
            install_mode
        );

        let json = request.to_json_pretty()?;
        let mut out = self.out.lock().map_err(|_| AppinstError::Installer {
            platform: self.platform.to_string(),
            message: "dry-run output lock poisoned".to_string(),
        })?;
        writeln!(out, "{}", json)?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Cloneable in-memory sink.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_dry_run_writes_request() {
        let buf = SharedBuf::default();
        let installer = DryRunInstaller::new(PlatformId::Win32, Box::new(buf.clone()));

        let shortcuts = vec![ShortcutDescription::new("Docs", vec!["{{WEBBROWSER}}".into()])];
        installer
            .install_application_menus(&[], &shortcuts, InstallMode::User, true)
            .unwrap();

        let written = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["platform"], "win32");
        assert_eq!(value["uninstall"], true);
        assert_eq!(value["shortcuts"][0]["cmd"][0], "{{WEBBROWSER}}");
    }
}
