//! Error types for watchdog timer operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while driving a watchdog timer device.
///
/// Only [`TimerError::Open`] is fatal to the guardian; the other
/// variants are recovered locally by the caller (warning logged,
/// execution continues).
#[derive(Error, Debug)]
pub enum TimerError {
    /// The device node could not be opened.
    ///
    /// Without the device no liveness guarantee can be offered, so
    /// callers treat this as fatal.
    #[error("failed opening watchdog device {path}: {source}")]
    Open {
        /// Path of the device node that failed to open.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// The driver rejected the requested timeout.
    #[error("failed setting watchdog timeout: {0}")]
    SetTimeout(#[source] io::Error),

    /// The driver could not report its current timeout.
    #[error("failed reading current watchdog timeout: {0}")]
    ReadTimeout(#[source] io::Error),

    /// A keep-alive request did not reach the driver.
    #[error("failed kicking watchdog: {0}")]
    Kick(#[source] io::Error),

    /// The magic-close write or the final close failed.
    #[error("failed disabling watchdog: {0}")]
    Disable(#[source] io::Error),
}

impl TimerError {
    /// True when the error leaves the guardian unable to offer any
    /// liveness guarantee.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

/// A specialized `Result` type for watchdog timer operations.
pub type TimerResult<T> = std::result::Result<T, TimerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_display_names_the_path() {
        let err = TimerError::Open {
            path: PathBuf::from("/dev/watchdog"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let text = err.to_string();
        assert!(text.contains("/dev/watchdog"));
        assert!(text.contains("failed opening"));
    }

    #[test]
    fn test_only_open_is_fatal() {
        let open = TimerError::Open {
            path: PathBuf::from("/dev/watchdog"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(open.is_fatal());

        let set = TimerError::SetTimeout(io::Error::from(io::ErrorKind::InvalidInput));
        assert!(!set.is_fatal());

        let read = TimerError::ReadTimeout(io::Error::from(io::ErrorKind::Unsupported));
        assert!(!read.is_fatal());
    }
}
