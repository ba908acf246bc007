//! Runtime version used to name the fallback menu.

use crate::config::RuntimeConfig;
use std::fmt;
use std::process::Command;
use tracing::{debug, warn};

/// A `MAJOR.MINOR` interpreter version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeVersion {
    pub major: u32,
    pub minor: u32,
}

impl RuntimeVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Parse `3.11`, `3.11.4` or the `Python 3.11.4` banner.
    pub fn parse(s: &str) -> Option<Self> {
        let version = s
            .trim()
            .strip_prefix(RuntimeConfig::NAME_PREFIX)
            .unwrap_or(s)
            .trim();
        let mut parts = version.split('.');
        let major = parts.next()?.trim().parse().ok()?;
        let minor: String = parts
            .next()?
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        Some(Self::new(major, minor.parse().ok()?))
    }

    /// Probe the installed interpreters for their version.
    pub fn probe() -> Option<Self> {
        RuntimeConfig::PROBE_COMMANDS.iter().find_map(|cmd| {
            let output = Command::new(cmd).arg("--version").output().ok()?;
            if !output.status.success() {
                return None;
            }
            // Python 2 printed its banner on stderr
            let banner = if output.stdout.is_empty() {
                String::from_utf8_lossy(&output.stderr).into_owned()
            } else {
                String::from_utf8_lossy(&output.stdout).into_owned()
            };
            let version = Self::parse(&banner);
            debug!("Probed {} --version: {:?}", cmd, version);
            version
        })
    }

    /// Probe, falling back to the built-in default.
    pub fn detect() -> Self {
        Self::probe().unwrap_or_else(|| {
            let (major, minor) = RuntimeConfig::FALLBACK_VERSION;
            warn!(
                "Could not determine interpreter version, using {}.{}",
                major, minor
            );
            Self::new(major, minor)
        })
    }

    /// Menu name for this runtime, e.g. `Python-3.11`.
    pub fn menu_name(&self) -> String {
        format!("{}-{}", RuntimeConfig::NAME_PREFIX, self)
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
