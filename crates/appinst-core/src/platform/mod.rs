//! Platform abstraction layer.
//!
//! All host inspection lives here so the dispatcher can be driven by a
//! simulated [`HostPlatform`] in tests.
//!
//! - `host` - OS family, Linux distribution and installer selection
//! - `paths` - Configuration file locations
//! - `runtime` - Interpreter version for the fallback menu name

pub mod host;
pub mod paths;
pub mod runtime;

pub use host::{Distribution, HostPlatform, OsFamily, PlatformId};
pub use paths::{appinst_config_dir, helpers_path, metadata_path};
pub use runtime::RuntimeVersion;
