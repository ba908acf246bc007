//! Centralized configuration for appinst.
//!
//! Constants for well-known file names, environment variables and fallbacks.

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "appinst";
    /// Directory name under the platform config dir.
    pub const APP_CONFIG_DIR_NAME: &'static str = "appinst";
    /// Installer metadata written by a bundling installer.
    pub const METADATA_FILENAME: &'static str = "installer.json";
    /// Overrides the metadata location when set.
    pub const METADATA_ENV_VAR: &'static str = "APPINST_METADATA";
    /// Platform helper program table.
    pub const HELPERS_FILENAME: &'static str = "helpers.json";
    /// Installer property that requests a system-wide install.
    pub const ALL_USERS_PROPERTY: &'static str = "ALLUSERS";
}

/// Runtime naming used for the default menu when no product metadata exists.
pub struct RuntimeConfig;

impl RuntimeConfig {
    pub const NAME_PREFIX: &'static str = "Python";
    /// Interpreters probed for their version, in order.
    pub const PROBE_COMMANDS: [&'static str; 2] = ["python3", "python"];
    /// Used when no interpreter answers the probe.
    pub const FALLBACK_VERSION: (u32, u32) = (3, 12);
}

/// Files consulted for Linux distribution detection.
pub struct DistributionConfig;

impl DistributionConfig {
    pub const OS_RELEASE_PATH: &'static str = "/etc/os-release";
    pub const REDHAT_RELEASE_PATH: &'static str = "/etc/redhat-release";
}
