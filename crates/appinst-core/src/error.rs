//! Error types for appinst.
//!
//! Every failure the dispatcher can report is fatal to the calling process.
//! The binary maps each kind to a distinct exit code via [`AppinstError::exit_code`].

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the appinst library.
#[derive(Debug, Error)]
pub enum AppinstError {
    // Input errors
    #[error("Invalid argument for {field}: {message}")]
    InvalidArgument { field: String, message: String },

    // Platform support errors
    #[error("{operation} is currently only supported for Windows, not for platform: {platform}")]
    UnsupportedOperation { operation: String, platform: String },

    #[error("Unhandled platform {platform}. Unable to create application menu(s).")]
    UnsupportedPlatform { platform: String },

    // Collaborator errors
    #[error("Platform installer for {platform} failed: {message}")]
    Installer { platform: String, message: String },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for appinst operations.
pub type Result<T> = std::result::Result<T, AppinstError>;

impl From<std::io::Error> for AppinstError {
    fn from(err: std::io::Error) -> Self {
        AppinstError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for AppinstError {
    fn from(err: serde_json::Error) -> Self {
        AppinstError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl AppinstError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        AppinstError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppinstError::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Convert to a process exit code.
    ///
    /// - 2: invalid argument
    /// - 3: unsupported operation
    /// - 4: unsupported platform
    /// - 1: everything else
    pub fn exit_code(&self) -> i32 {
        match self {
            AppinstError::InvalidArgument { .. } => 2,
            AppinstError::UnsupportedOperation { .. } => 3,
            AppinstError::UnsupportedPlatform { .. } => 4,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppinstError::UnsupportedOperation {
            operation: "Uninstall".into(),
            platform: "linux2".into(),
        };
        assert_eq!(
            err.to_string(),
            "Uninstall is currently only supported for Windows, not for platform: linux2"
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            AppinstError::invalid_argument("install_mode", "bad").exit_code(),
            2
        );
        assert_eq!(
            AppinstError::UnsupportedPlatform {
                platform: "sunos5".into()
            }
            .exit_code(),
            4
        );
        assert_eq!(
            AppinstError::Config {
                message: "x".into()
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_io_with_path_keeps_path() {
        let err = AppinstError::io_with_path(
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            "/tmp/installer.json",
        );
        match err {
            AppinstError::Io { path, .. } => {
                assert_eq!(path, Some(PathBuf::from("/tmp/installer.json")));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
