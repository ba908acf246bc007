//! Host operating system and distribution detection.
//!
//! Detection mirrors the historical platform tokens (`linux2`, `darwin`,
//! `win32`) so that helper programs and manifests written against them keep
//! working. A [`HostPlatform`] can also be built from a token to simulate
//! another host.

use crate::config::DistributionConfig;
use crate::error::{AppinstError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Operating system family of the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OsFamily {
    Linux,
    MacOs,
    Windows,
    /// Anything else, carrying its platform token.
    Other(String),
}

impl OsFamily {
    /// The family this binary was compiled for.
    pub fn current() -> Self {
        #[cfg(target_os = "linux")]
        {
            OsFamily::Linux
        }
        #[cfg(target_os = "macos")]
        {
            OsFamily::MacOs
        }
        #[cfg(target_os = "windows")]
        {
            OsFamily::Windows
        }
        #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
        {
            OsFamily::Other(std::env::consts::OS.to_string())
        }
    }

    /// Historical platform token for this family.
    pub fn token(&self) -> &str {
        match self {
            OsFamily::Linux => "linux2",
            OsFamily::MacOs => "darwin",
            OsFamily::Windows => "win32",
            OsFamily::Other(token) => token,
        }
    }
}

/// A Linux distribution name and version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// Lowercase distribution id (`redhat`, `rhel`, `ubuntu`, ...).
    pub id: String,
    /// Version string as reported, e.g. `4` or `8.9`.
    pub version: String,
}

impl Distribution {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
        }
    }

    /// Whether this is a Red Hat family release.
    pub fn is_redhat(&self) -> bool {
        matches!(self.id.as_str(), "redhat" | "rhel")
    }

    /// Major version component, if the version starts with digits.
    pub fn major_version(&self) -> Option<u32> {
        let digits: String = self
            .version
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }

    /// Parse the first line of `/etc/redhat-release`.
    ///
    /// The id comes from the vendor prefix: `Red Hat` and `CentOS` report as
    /// `redhat`, `Fedora` as `fedora`, anything else as its first word
    /// lowercased. The version is the word following `release`.
    pub fn from_redhat_release(content: &str) -> Option<Self> {
        let line = content.lines().next()?.trim();
        let id = if line.starts_with("Red Hat") || line.starts_with("CentOS") {
            "redhat".to_string()
        } else {
            line.split_whitespace().next()?.to_lowercase()
        };

        let mut words = line.split_whitespace();
        words.find(|w| *w == "release")?;
        let version = words.next()?;
        Some(Self::new(id, version))
    }

    /// Parse an `os-release` file (`ID` and `VERSION_ID` keys).
    pub fn from_os_release(content: &str) -> Option<Self> {
        let mut id = None;
        let mut version = String::new();

        for line in content.lines() {
            let Some((key, value)) = line.trim().split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            match key {
                "ID" => id = Some(value.to_lowercase()),
                "VERSION_ID" => version = value.to_string(),
                _ => {}
            }
        }

        id.map(|id| Self::new(id, version))
    }

    /// Detect the distribution from the given release files.
    ///
    /// `redhat-release` takes precedence over `os-release`.
    pub fn detect_from(os_release: &Path, redhat_release: &Path) -> Option<Self> {
        if let Ok(content) = fs::read_to_string(redhat_release) {
            if let Some(dist) = Self::from_redhat_release(&content) {
                return Some(dist);
            }
        }

        fs::read_to_string(os_release)
            .ok()
            .and_then(|content| Self::from_os_release(&content))
    }

    /// Detect the distribution of the running system.
    pub fn detect() -> Option<Self> {
        Self::detect_from(
            Path::new(DistributionConfig::OS_RELEASE_PATH),
            Path::new(DistributionConfig::REDHAT_RELEASE_PATH),
        )
    }
}

/// The host the dispatcher is running on, real or simulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlatform {
    pub os: OsFamily,
    /// Only meaningful on Linux.
    pub distribution: Option<Distribution>,
}

impl HostPlatform {
    pub fn new(os: OsFamily, distribution: Option<Distribution>) -> Self {
        Self { os, distribution }
    }

    /// Detect the running host.
    pub fn detect() -> Self {
        let os = OsFamily::current();
        let distribution = if os == OsFamily::Linux {
            Distribution::detect()
        } else {
            None
        };
        debug!("Detected host {} ({:?})", os.token(), distribution);
        Self { os, distribution }
    }

    /// Build a simulated host from a platform token.
    ///
    /// Accepts the [`PlatformId`] tokens; anything else becomes
    /// [`OsFamily::Other`].
    pub fn from_token(token: &str) -> Self {
        match token {
            "linux" | "linux2" => Self::new(OsFamily::Linux, None),
            "redhat3" => Self::new(OsFamily::Linux, Some(Distribution::new("redhat", "3"))),
            "redhat4" => Self::new(OsFamily::Linux, Some(Distribution::new("redhat", "4"))),
            "darwin" => Self::new(OsFamily::MacOs, None),
            "win32" => Self::new(OsFamily::Windows, None),
            other => Self::new(OsFamily::Other(other.to_string()), None),
        }
    }

    pub fn is_windows(&self) -> bool {
        self.os == OsFamily::Windows
    }

    /// Platform token of the OS family.
    pub fn token(&self) -> &str {
        self.os.token()
    }
}

/// Identifier of a platform installer implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlatformId {
    #[serde(rename = "linux2")]
    Linux,
    #[serde(rename = "redhat3")]
    RedHat3,
    #[serde(rename = "redhat4")]
    RedHat4,
    #[serde(rename = "darwin")]
    Darwin,
    #[serde(rename = "win32")]
    Win32,
}

impl PlatformId {
    pub const ALL: [PlatformId; 5] = [
        PlatformId::Linux,
        PlatformId::RedHat3,
        PlatformId::RedHat4,
        PlatformId::Darwin,
        PlatformId::Win32,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformId::Linux => "linux2",
            PlatformId::RedHat3 => "redhat3",
            PlatformId::RedHat4 => "redhat4",
            PlatformId::Darwin => "darwin",
            PlatformId::Win32 => "win32",
        }
    }

    /// Installer to try when no dedicated one is registered.
    pub fn fallback(&self) -> Option<PlatformId> {
        match self {
            PlatformId::RedHat3 | PlatformId::RedHat4 => Some(PlatformId::Linux),
            _ => None,
        }
    }

    /// Pick the installer for a host.
    pub fn resolve(host: &HostPlatform) -> Result<PlatformId> {
        match &host.os {
            OsFamily::Linux => {
                let redhat_major = host
                    .distribution
                    .as_ref()
                    .filter(|d| d.is_redhat())
                    .and_then(|d| d.major_version());
                Ok(match redhat_major {
                    Some(3) => PlatformId::RedHat3,
                    Some(4) => PlatformId::RedHat4,
                    _ => PlatformId::Linux,
                })
            }
            OsFamily::MacOs => Ok(PlatformId::Darwin),
            OsFamily::Windows => Ok(PlatformId::Win32),
            OsFamily::Other(token) => Err(AppinstError::UnsupportedPlatform {
                platform: token.clone(),
            }),
        }
    }
}

impl FromStr for PlatformId {
    type Err = AppinstError;

    fn from_str(s: &str) -> Result<Self> {
        PlatformId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| AppinstError::UnsupportedPlatform {
                platform: s.to_string(),
            })
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
