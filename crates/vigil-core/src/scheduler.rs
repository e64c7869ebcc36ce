//! The unbounded keep-alive loop.
//!
//! One non-terminal state: kick, wait one interval, repeat. The wait
//! is the single suspension point of the whole daemon; it is where a
//! shutdown request is observed. There is no other way out of the
//! loop, no bounded retry, no backoff.

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use crate::error::GuardianResult;
use crate::guardian::ExitReason;
use crate::shutdown::ShutdownHandler;
use vigil_timer::WatchdogTimer;

/// Runs the liveness loop against an owned timer.
///
/// The scheduler kicks immediately on entry (t = 0) and then every
/// interval. A kick failure is logged at debug level and otherwise
/// ignored: kicks are frequent and idempotent, so the next scheduled
/// kick is the retry.
#[derive(Debug)]
pub struct KickScheduler<T> {
    timer: T,
    interval: Duration,
    shutdown: Option<ShutdownHandler>,
}

impl<T: WatchdogTimer> KickScheduler<T> {
    /// Create a scheduler kicking `timer` every `interval_secs`.
    ///
    /// Pass a [`ShutdownHandler`] only when safe exit was requested;
    /// with `None` the loop can never end on its own and the process
    /// dies with the timer armed.
    #[must_use]
    pub fn new(timer: T, interval_secs: u32, shutdown: Option<ShutdownHandler>) -> Self {
        // tokio::time::interval panics on a zero period. Negotiated
        // and validated intervals are already nonzero; this guards
        // direct construction.
        let interval_secs = interval_secs.max(1);
        Self {
            timer,
            interval: Duration::from_secs(u64::from(interval_secs)),
            shutdown,
        }
    }

    /// Run the loop until a shutdown request arrives.
    ///
    /// Without a shutdown handler this future never resolves.
    ///
    /// # Errors
    ///
    /// Returns an error only when the safe-exit disable sequence
    /// itself fails; the timer is then in an undefined armed state
    /// and the caller exits non-zero.
    pub async fn run(mut self) -> GuardianResult<ExitReason> {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        match self.shutdown.take() {
            Some(shutdown) => {
                loop {
                    tokio::select! {
                        _ = ticker.tick() => self.kick_once(),
                        () = shutdown.requested() => break,
                    }
                }
                // Shutdown runs to completion on this task before
                // anything else resumes, so disable never races a
                // kick.
                debug!("shutdown requested, disarming watchdog");
                self.timer.disable()?;
                shutdown.terminated();
                Ok(ExitReason::Disarmed)
            }
            None => loop {
                ticker.tick().await;
                self.kick_once();
            },
        }
    }

    fn kick_once(&mut self) {
        if let Err(err) = self.timer.kick() {
            // Fire-and-forget: the next tick is the implicit retry.
            debug!(error = %err, "kick failed");
        }
    }
}

/// Log margin warnings exactly once, at startup.
pub(crate) fn log_warnings(warnings: &[crate::negotiate::MarginWarning]) {
    for warning in warnings {
        warn!("{warning}");
    }
}
