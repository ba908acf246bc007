//! Platform dispatch for menu installation.

use crate::error::{AppinstError, Result};
use crate::installer::PlatformInstaller;
use crate::metadata::InstallerMetadata;
use crate::platform::{HostPlatform, PlatformId, RuntimeVersion};
use crate::types::{InstallMode, MenuDescription, ShortcutDescription};
use std::collections::HashMap;
use tracing::{debug, info};

/// Selects the platform installer for the host and hands it a normalized
/// request.
pub struct Dispatcher {
    host: HostPlatform,
    metadata: Option<InstallerMetadata>,
    runtime: Option<RuntimeVersion>,
    installers: HashMap<PlatformId, Box<dyn PlatformInstaller>>,
}

impl Dispatcher {
    /// Create a builder for the detected host.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    pub fn host(&self) -> &HostPlatform {
        &self.host
    }

    /// Product name used for the default menu.
    ///
    /// The installer's full name when metadata is present, otherwise
    /// `Python-MAJOR.MINOR`.
    pub fn product_name(&self) -> String {
        match &self.metadata {
            Some(metadata) => metadata.full_name.clone(),
            None => self
                .runtime
                .unwrap_or_else(RuntimeVersion::detect)
                .menu_name(),
        }
    }

    /// The menu used when a caller supplies none.
    pub fn default_menu(&self) -> Vec<MenuDescription> {
        vec![MenuDescription::named(self.product_name())]
    }

    /// Install menus and shortcuts on the host, or uninstall them.
    ///
    /// `install_mode` must be `user` or `system`. An installer that recorded
    /// `ALLUSERS=1` on Windows forces `system`. Uninstall is only available
    /// on Windows. When `menus` is empty the default menu is used and every
    /// shortcut is placed in it.
    pub fn install(
        &self,
        menus: Vec<MenuDescription>,
        mut shortcuts: Vec<ShortcutDescription>,
        install_mode: &str,
        uninstall: bool,
    ) -> Result<()> {
        let install_mode = self.effective_install_mode(install_mode)?;

        if uninstall && !self.host.is_windows() {
            return Err(AppinstError::UnsupportedOperation {
                operation: "Uninstall".to_string(),
                platform: self.host.token().to_string(),
            });
        }

        let menus = if menus.is_empty() {
            let menus = self.default_menu();
            let product = menus[0].name.clone();
            debug!("No menus given, using default menu {}", product);
            for shortcut in &mut shortcuts {
                shortcut.categories = vec![product.clone()];
            }
            menus
        } else {
            menus
        };

        let platform = PlatformId::resolve(&self.host)?;
        let installer = self.installer_for(platform)?;

        info!(
            "{} {} menu(s) and {} shortcut(s) via {} installer ({} mode)",
            if uninstall { "Uninstalling" } else { "Installing" },
            menus.len(),
            shortcuts.len(),
            installer.platform(),
            install_mode
        );

        installer.install_application_menus(&menus, &shortcuts, install_mode, uninstall)
    }

    /// Uninstall menus and shortcuts. Equivalent to `install(.., true)`.
    pub fn uninstall(
        &self,
        menus: Vec<MenuDescription>,
        shortcuts: Vec<ShortcutDescription>,
        install_mode: &str,
    ) -> Result<()> {
        self.install(menus, shortcuts, install_mode, true)
    }

    fn effective_install_mode(&self, requested: &str) -> Result<InstallMode> {
        let forced = self.host.is_windows()
            && self
                .metadata
                .as_ref()
                .is_some_and(InstallerMetadata::all_users);
        if forced {
            debug!("Installer recorded ALLUSERS=1, forcing system install");
            return Ok(InstallMode::System);
        }
        requested.parse()
    }

    fn installer_for(&self, platform: PlatformId) -> Result<&dyn PlatformInstaller> {
        if let Some(installer) = self.installers.get(&platform) {
            return Ok(installer.as_ref());
        }

        if let Some(fallback) = platform.fallback() {
            if let Some(installer) = self.installers.get(&fallback) {
                debug!("No {} installer registered, using {}", platform, fallback);
                return Ok(installer.as_ref());
            }
        }

        Err(AppinstError::UnsupportedPlatform {
            platform: platform.to_string(),
        })
    }
}

/// Builder for [`Dispatcher`].
///
/// # Example
///
/// ```rust,ignore
/// use appinst::{Dispatcher, DryRunInstaller, PlatformId};
///
/// let dispatcher = Dispatcher::builder()
///     .installer(DryRunInstaller::stdout(PlatformId::Linux))
///     .build();
/// dispatcher.install(Vec::new(), shortcuts, "user", false)?;
/// ```
pub struct DispatcherBuilder {
    host: Option<HostPlatform>,
    metadata: Option<InstallerMetadata>,
    runtime: Option<RuntimeVersion>,
    installers: HashMap<PlatformId, Box<dyn PlatformInstaller>>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self {
            host: None,
            metadata: None,
            runtime: None,
            installers: HashMap::new(),
        }
    }

    /// Use a specific host instead of detecting it.
    pub fn host(mut self, host: HostPlatform) -> Self {
        self.host = Some(host);
        self
    }

    /// Provide installer metadata.
    pub fn metadata(mut self, metadata: Option<InstallerMetadata>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Fix the runtime version used for the fallback menu name.
    ///
    /// Default: probed from the installed interpreter on first use.
    pub fn runtime_version(mut self, version: RuntimeVersion) -> Self {
        self.runtime = Some(version);
        self
    }

    /// Register an installer under its own platform, replacing any previous one.
    pub fn installer(self, installer: impl PlatformInstaller + 'static) -> Self {
        self.boxed_installer(Box::new(installer))
    }

    pub fn boxed_installer(mut self, installer: Box<dyn PlatformInstaller>) -> Self {
        self.installers.insert(installer.platform(), installer);
        self
    }

    pub fn build(self) -> Dispatcher {
        let host = self.host.unwrap_or_else(HostPlatform::detect);
        debug!(
            "Dispatcher for {} with {} installer(s)",
            host.token(),
            self.installers.len()
        );
        Dispatcher {
            host,
            metadata: self.metadata,
            runtime: self.runtime,
            installers: self.installers,
        }
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installer::DryRunInstaller;

    fn dispatcher_for(token: &str) -> Dispatcher {
        Dispatcher::builder()
            .host(HostPlatform::from_token(token))
            .runtime_version(RuntimeVersion::new(2, 7))
            .installer(DryRunInstaller::new(PlatformId::Linux, Box::new(std::io::sink())))
            .installer(DryRunInstaller::new(PlatformId::Win32, Box::new(std::io::sink())))
            .build()
    }

    #[test]
    fn test_default_menu_without_metadata() {
        let menus = dispatcher_for("linux2").default_menu();
        assert_eq!(menus, vec![MenuDescription::named("Python-2.7")]);
    }

    #[test]
    fn test_default_menu_uses_product_name() {
        let dispatcher = Dispatcher::builder()
            .host(HostPlatform::from_token("darwin"))
            .metadata(Some(InstallerMetadata::new("EPD-7.1")))
            .build();
        let menus = dispatcher.default_menu();
        assert_eq!(menus.len(), 1);
        assert_eq!(menus[0].id, "EPD-7.1");
        assert_eq!(menus[0].name, "EPD-7.1");
    }

    #[test]
    fn test_all_users_only_forces_system_on_windows() {
        let metadata = InstallerMetadata::new("EPD-7.1").with_property("ALLUSERS", "1");

        let windows = Dispatcher::builder()
            .host(HostPlatform::from_token("win32"))
            .metadata(Some(metadata.clone()))
            .build();
        assert_eq!(
            windows.effective_install_mode("user").unwrap(),
            InstallMode::System
        );

        let linux = Dispatcher::builder()
            .host(HostPlatform::from_token("linux2"))
            .metadata(Some(metadata))
            .build();
        assert_eq!(
            linux.effective_install_mode("user").unwrap(),
            InstallMode::User
        );
    }

    #[test]
    fn test_redhat_falls_back_to_linux_installer() {
        let dispatcher = dispatcher_for("redhat3");
        let installer = dispatcher.installer_for(PlatformId::RedHat3).unwrap();
        assert_eq!(installer.platform(), PlatformId::Linux);
    }

    #[test]
    fn test_missing_installer_is_unsupported_platform() {
        let dispatcher = dispatcher_for("darwin");
        let err = dispatcher
            .install(Vec::new(), Vec::new(), "user", false)
            .unwrap_err();
        assert!(matches!(err, AppinstError::UnsupportedPlatform { .. }));
    }
}
