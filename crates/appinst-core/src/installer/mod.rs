//! Platform installer interface.
//!
//! A [`PlatformInstaller`] does the real work of writing desktop files,
//! bundles or Start Menu entries for one platform. This crate treats those
//! implementations as black boxes and ships two delegating ones:
//!
//! - [`CommandInstaller`] hands the request to an external helper program
//! - [`DryRunInstaller`] reports the request without changing anything

mod command;
mod dry_run;

pub use command::{CommandInstaller, HelperCommand, HelperConfig};
pub use dry_run::DryRunInstaller;

use crate::error::Result;
use crate::platform::PlatformId;
use crate::types::{InstallMode, MenuDescription, ShortcutDescription};
use serde::Serialize;

/// Installs application menus for one platform.
pub trait PlatformInstaller: Send + Sync {
    /// The platform this installer handles.
    fn platform(&self) -> PlatformId;

    /// Install (or, where supported, uninstall) menus and shortcuts.
    fn install_application_menus(
        &self,
        menus: &[MenuDescription],
        shortcuts: &[ShortcutDescription],
        install_mode: InstallMode,
        uninstall: bool,
    ) -> Result<()>;
}

/// The normalized argument set handed to a platform installer.
#[derive(Debug, Clone, Serialize)]
pub struct InstallRequest<'a> {
    pub platform: PlatformId,
    pub install_mode: InstallMode,
    pub uninstall: bool,
    pub menus: &'a [MenuDescription],
    pub shortcuts: &'a [ShortcutDescription],
}

impl<'a> InstallRequest<'a> {
    pub fn new(
        platform: PlatformId,
        menus: &'a [MenuDescription],
        shortcuts: &'a [ShortcutDescription],
        install_mode: InstallMode,
        uninstall: bool,
    ) -> Self {
        Self {
            platform,
            install_mode,
            uninstall,
            menus,
            shortcuts,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
