//! appinst - install application menus and shortcuts on any desktop.
//!
//! Menus and shortcuts are described once, independent of the platform, and
//! handed to a [`Dispatcher`]. The dispatcher validates the install mode,
//! fills in a default menu when none is given, detects the host (including
//! the legacy RedHat 3 and 4 releases) and delegates to the
//! [`PlatformInstaller`] registered for it. Menus end up as freedesktop.org
//! desktop files on Linux, bundles on OS X and Start Menu items on Windows,
//! depending on which installer is plugged in.
//!
//! # Example
//!
//! ```rust,ignore
//! use appinst::{Dispatcher, HelperConfig, InstallManifest, InstallerMetadata};
//! use std::path::Path;
//!
//! fn main() -> appinst::Result<()> {
//!     let manifest = InstallManifest::load(Path::new("menus.json"))?;
//!     let helpers = HelperConfig::load(Path::new("helpers.json"))?;
//!
//!     let mut builder = Dispatcher::builder().metadata(InstallerMetadata::discover(None)?);
//!     for installer in helpers.installers() {
//!         builder = builder.installer(installer);
//!     }
//!
//!     builder
//!         .build()
//!         .install(manifest.menus, manifest.shortcuts, "user", false)
//! }
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod installer;
pub mod metadata;
pub mod platform;
pub mod types;

// Re-export commonly used types
pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use error::{AppinstError, Result};
pub use installer::{
    CommandInstaller, DryRunInstaller, HelperCommand, HelperConfig, InstallRequest,
    PlatformInstaller,
};
pub use metadata::InstallerMetadata;
pub use platform::{Distribution, HostPlatform, OsFamily, PlatformId, RuntimeVersion};
pub use types::{CommandToken, InstallManifest, InstallMode, MenuDescription, ShortcutDescription};
