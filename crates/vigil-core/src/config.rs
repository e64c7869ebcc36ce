//! Daemon configuration.
//!
//! [`DaemonConfig`] is assembled once at startup (by the CLI layer)
//! and never mutated afterwards; everything derived from it, like the
//! effective kick interval, is computed exactly once during the
//! negotiation phase.

use std::path::PathBuf;

use crate::error::{GuardianError, GuardianResult};
use vigil_timer::WATCHDOG_DEVICE;

/// Default hardware timeout requested from the driver, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u32 = 20;

/// Fallback kick interval when the driver cannot report its timeout
/// and the operator gave no explicit interval.
pub const DEFAULT_KICK_INTERVAL_SECS: u32 = DEFAULT_TIMEOUT_SECS / 2;

/// Immutable guardian daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    /// Hardware timeout to request from the driver, in seconds.
    ///
    /// The driver may clamp this; the negotiated value read back
    /// from the device is authoritative.
    pub timeout_secs: u32,

    /// Explicit kick interval override, in seconds.
    ///
    /// `None` means "half the negotiated timeout". An explicit value
    /// is used as-is even when it leaves no safety margin.
    pub kick_interval_secs: Option<u32>,

    /// Disarm the timer on SIGINT/SIGTERM instead of letting it
    /// reboot the host.
    pub safe_exit: bool,

    /// Emit debug-level output.
    pub verbose: bool,

    /// Stay in the foreground instead of backgrounding.
    pub foreground: bool,

    /// Log destination when backgrounded; `None` means the journal.
    pub log_file: Option<PathBuf>,

    /// Device node to open.
    pub device: PathBuf,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            kick_interval_secs: None,
            safe_exit: false,
            verbose: false,
            foreground: false,
            log_file: None,
            device: PathBuf::from(WATCHDOG_DEVICE),
        }
    }
}

impl DaemonConfig {
    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> DaemonConfigBuilder {
        DaemonConfigBuilder::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GuardianError::InvalidConfig`] if the timeout or an
    /// explicit interval is zero.
    pub fn validate(&self) -> GuardianResult<()> {
        if self.timeout_secs == 0 {
            return Err(GuardianError::invalid_config(
                "timeout must be greater than 0 seconds",
            ));
        }
        if self.kick_interval_secs == Some(0) {
            return Err(GuardianError::invalid_config(
                "kick interval must be greater than 0 seconds",
            ));
        }
        Ok(())
    }
}

/// Builder for [`DaemonConfig`].
#[derive(Debug, Default)]
pub struct DaemonConfigBuilder {
    config: DaemonConfig,
}

impl DaemonConfigBuilder {
    /// Set the requested hardware timeout in seconds.
    #[must_use]
    pub fn timeout_secs(mut self, secs: u32) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// Set an explicit kick interval in seconds.
    #[must_use]
    pub fn kick_interval_secs(mut self, secs: Option<u32>) -> Self {
        self.config.kick_interval_secs = secs;
        self
    }

    /// Enable or disable safe-exit behavior.
    #[must_use]
    pub fn safe_exit(mut self, enabled: bool) -> Self {
        self.config.safe_exit = enabled;
        self
    }

    /// Enable or disable verbose output.
    #[must_use]
    pub fn verbose(mut self, enabled: bool) -> Self {
        self.config.verbose = enabled;
        self
    }

    /// Run in the foreground instead of backgrounding.
    #[must_use]
    pub fn foreground(mut self, enabled: bool) -> Self {
        self.config.foreground = enabled;
        self
    }

    /// Log to the given file when backgrounded.
    #[must_use]
    pub fn log_file(mut self, path: Option<PathBuf>) -> Self {
        self.config.log_file = path;
        self
    }

    /// Override the device node to open.
    #[must_use]
    pub fn device(mut self, path: PathBuf) -> Self {
        self.config.device = path;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> GuardianResult<DaemonConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
