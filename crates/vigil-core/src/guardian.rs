//! The guardian session.
//!
//! [`Guardian`] is the context object built once at startup: it owns
//! the timer handle, the immutable configuration and the optional
//! safe-exit handler, replacing the global mutable state of older
//! watchdog daemons. Startup order matters and is fixed here:
//! set-timeout attempt, read-back, negotiation, then the loop.

use tracing::{debug, info, warn};

use crate::config::DaemonConfig;
use crate::error::GuardianResult;
use crate::negotiate::{TimeoutReading, negotiate_interval};
use crate::scheduler::{KickScheduler, log_warnings};
use crate::shutdown::ShutdownHandler;
use vigil_timer::WatchdogTimer;

/// Why the guardian returned instead of running forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Safe exit: the timer was disarmed and closed; exit status 0.
    Disarmed,
}

/// A running guardian session over an open timer handle.
#[derive(Debug)]
pub struct Guardian<T> {
    timer: T,
    config: DaemonConfig,
    shutdown: Option<ShutdownHandler>,
}

impl<T: WatchdogTimer> Guardian<T> {
    /// Build a session from an already-open timer.
    ///
    /// The device must be opened after backgrounding completes so the
    /// descriptor is not duplicated across the process split; that
    /// ordering is the caller's responsibility.
    #[must_use]
    pub fn new(timer: T, config: DaemonConfig, shutdown: Option<ShutdownHandler>) -> Self {
        Self {
            timer,
            config,
            shutdown,
        }
    }

    /// Negotiate the schedule and run the keep-alive loop.
    ///
    /// Set-timeout and read-timeout failures are absorbed with a
    /// warning; the loop runs regardless, on the best interval that
    /// could be derived. Without safe exit this future never
    /// resolves.
    ///
    /// # Errors
    ///
    /// Returns an error only if the safe-exit disable sequence fails.
    pub async fn run(mut self) -> GuardianResult<ExitReason> {
        if let Err(err) = self.timer.set_timeout(self.config.timeout_secs) {
            warn!(error = %err, "driver rejected requested timeout, continuing");
        }

        // Trust the read-back, not the request: drivers clamp.
        let reading = match self.timer.read_timeout() {
            Ok(secs) => {
                debug!(secs, "negotiated watchdog timeout");
                TimeoutReading::Known(secs)
            }
            Err(err) => {
                warn!(error = %err, "could not read watchdog timeout, using fallback interval");
                TimeoutReading::Unknown
            }
        };

        let schedule = negotiate_interval(reading, self.config.kick_interval_secs);
        log_warnings(&schedule.warnings);
        info!(
            interval_secs = schedule.interval_secs,
            safe_exit = self.config.safe_exit,
            "watchdog kick interval set"
        );

        KickScheduler::new(self.timer, schedule.interval_secs, self.shutdown)
            .run()
            .await
    }
}
