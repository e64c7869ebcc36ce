//! Error types for the guardian session.

use thiserror::Error;
use vigil_timer::TimerError;

/// Errors that can abort the guardian.
///
/// Recoverable device conditions (rejected set-timeout, unreadable
/// timeout, dropped kicks) never surface here; they are logged and
/// absorbed where they occur.
#[derive(Error, Debug)]
pub enum GuardianError {
    /// Invalid daemon configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A fatal device error, in practice a failed open.
    #[error(transparent)]
    Device(#[from] TimerError),
}

impl GuardianError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// A specialized `Result` type for guardian operations.
pub type GuardianResult<T> = std::result::Result<T, GuardianError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = GuardianError::invalid_config("timeout must be greater than 0");
        assert_eq!(
            err.to_string(),
            "invalid configuration: timeout must be greater than 0"
        );
    }

    #[test]
    fn test_device_error_is_transparent() {
        let inner = TimerError::SetTimeout(std::io::Error::from(
            std::io::ErrorKind::InvalidInput,
        ));
        let text = inner.to_string();
        let err = GuardianError::from(inner);
        assert_eq!(err.to_string(), text);
    }
}
