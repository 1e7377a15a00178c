// SPDX-License-Identifier: MPL-2.0
//! Error types shared across the crate.
//!
//! Nothing in the dialog core is fatal: unknown identifiers are no-ops and
//! hook failures are logged. The only failure surfaced to callers is a
//! confirm handler rejecting, which arrives through the completion signal.

use thiserror::Error;

/// Crate-level error for I/O and configuration failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
}

/// Failure reported by a confirm handler, either synchronously or from its
/// deferred result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ConfirmError {
    message: String,
}

impl ConfirmError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure returned by a lifecycle hook. Logged, never propagated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("hook failed: {0}")]
pub struct HookError(pub String);

/// Reasons a completion signal settles without an outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DialogError {
    /// The confirm handler failed; the dialog is left open.
    #[error("confirm handler rejected: {0}")]
    Rejected(#[from] ConfirmError),
    /// The owning registry was dropped before the dialog settled.
    #[error("dialog dropped before it settled")]
    Dropped,
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn confirm_error_converts_into_rejection() {
        let err: DialogError = ConfirmError::new("server said no").into();
        assert_eq!(err, DialogError::Rejected(ConfirmError::new("server said no")));
        assert_eq!(err.to_string(), "confirm handler rejected: server said no");
    }

    #[test]
    fn hook_error_display() {
        assert_eq!(HookError("boom".into()).to_string(), "hook failed: boom");
    }
}
