//! Simulated watchdog timer.
//!
//! This module provides [`SimWatchdogTimer`], an in-memory
//! implementation of the [`WatchdogTimer`] trait for testing and
//! hardware-free environments. It can imitate the quirks real
//! drivers exhibit: clamping a requested timeout to a supported
//! value, rejecting the set request, or being unable to report the
//! current timeout at all.
//!
//! Because [`WatchdogTimer::disable`] consumes the timer, the
//! simulated device exposes a [`SimProbe`] that stays observable
//! after the handle is gone, so tests can assert on what the
//! "hardware" saw.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

use crate::error::{TimerError, TimerResult};
use crate::timer::WatchdogTimer;

#[derive(Debug, Default)]
struct SimState {
    timeout_secs: AtomicU32,
    kick_count: AtomicU64,
    magic_close_written: AtomicBool,
    closed: AtomicBool,
}

/// Observation handle onto a [`SimWatchdogTimer`].
///
/// Cloneable and independent of the timer's lifetime.
#[derive(Debug, Clone)]
pub struct SimProbe {
    state: Arc<SimState>,
}

impl SimProbe {
    /// Number of keep-alive requests the device received.
    #[must_use]
    pub fn kick_count(&self) -> u64 {
        self.state.kick_count.load(Ordering::Acquire)
    }

    /// Timeout currently programmed into the device.
    #[must_use]
    pub fn timeout_secs(&self) -> u32 {
        self.state.timeout_secs.load(Ordering::Acquire)
    }

    /// True once the magic-close byte was written.
    #[must_use]
    pub fn magic_close_written(&self) -> bool {
        self.state.magic_close_written.load(Ordering::Acquire)
    }

    /// True once the handle was closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::Acquire)
    }

    /// True when the device was left armed: handle gone or going
    /// without a preceding magic close.
    #[must_use]
    pub fn left_armed(&self) -> bool {
        !self.magic_close_written()
    }
}

/// In-memory watchdog timer for tests and hardware-free runs.
///
/// # Example
///
/// ```rust
/// use vigil_timer::prelude::*;
///
/// // A driver that clamps every request to 30 seconds.
/// let mut timer = SimWatchdogTimer::with_timeout(20).clamping_to(30);
/// assert!(timer.set_timeout(45).is_ok());
/// assert!(matches!(timer.read_timeout(), Ok(30)));
/// ```
#[derive(Debug)]
pub struct SimWatchdogTimer {
    state: Arc<SimState>,
    clamp_to: Option<u32>,
    reject_set: bool,
    fail_read: bool,
    fail_kick: bool,
}

impl SimWatchdogTimer {
    /// Create a simulated timer with the given initial timeout.
    #[must_use]
    pub fn with_timeout(timeout_secs: u32) -> Self {
        let state = SimState {
            timeout_secs: AtomicU32::new(timeout_secs),
            ..SimState::default()
        };
        Self {
            state: Arc::new(state),
            clamp_to: None,
            reject_set: false,
            fail_read: false,
            fail_kick: false,
        }
    }

    /// Imitate a driver that silently clamps every requested timeout
    /// to `secs`.
    #[must_use]
    pub fn clamping_to(mut self, secs: u32) -> Self {
        self.clamp_to = Some(secs);
        self
    }

    /// Imitate a driver that rejects `set_timeout` requests.
    #[must_use]
    pub fn rejecting_set_timeout(mut self) -> Self {
        self.reject_set = true;
        self
    }

    /// Imitate a driver that cannot report its current timeout.
    #[must_use]
    pub fn failing_read_timeout(mut self) -> Self {
        self.fail_read = true;
        self
    }

    /// Imitate a driver that drops keep-alive requests.
    #[must_use]
    pub fn failing_kick(mut self) -> Self {
        self.fail_kick = true;
        self
    }

    /// Observation handle that outlives the timer.
    #[must_use]
    pub fn probe(&self) -> SimProbe {
        SimProbe {
            state: Arc::clone(&self.state),
        }
    }
}

impl WatchdogTimer for SimWatchdogTimer {
    fn kick(&mut self) -> TimerResult<()> {
        if self.fail_kick {
            return Err(TimerError::Kick(io::Error::from(io::ErrorKind::BrokenPipe)));
        }
        self.state.kick_count.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    fn set_timeout(&mut self, secs: u32) -> TimerResult<()> {
        if self.reject_set {
            return Err(TimerError::SetTimeout(io::Error::from(
                io::ErrorKind::InvalidInput,
            )));
        }
        let applied = self.clamp_to.unwrap_or(secs);
        self.state.timeout_secs.store(applied, Ordering::Release);
        Ok(())
    }

    fn read_timeout(&mut self) -> TimerResult<u32> {
        if self.fail_read {
            return Err(TimerError::ReadTimeout(io::Error::from(
                io::ErrorKind::Unsupported,
            )));
        }
        Ok(self.state.timeout_secs.load(Ordering::Acquire))
    }

    fn disable(self) -> TimerResult<()> {
        self.state.magic_close_written.store(true, Ordering::Release);
        self.state.closed.store(true, Ordering::Release);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kick_counts() -> TimerResult<()> {
        let mut timer = SimWatchdogTimer::with_timeout(20);
        let probe = timer.probe();
        timer.kick()?;
        timer.kick()?;
        assert_eq!(probe.kick_count(), 2);
        Ok(())
    }

    #[test]
    fn test_set_then_read_round_trip() -> TimerResult<()> {
        let mut timer = SimWatchdogTimer::with_timeout(20);
        timer.set_timeout(45)?;
        assert_eq!(timer.read_timeout()?, 45);
        Ok(())
    }

    #[test]
    fn test_clamping_driver_reports_clamped_value() -> TimerResult<()> {
        let mut timer = SimWatchdogTimer::with_timeout(20).clamping_to(30);
        timer.set_timeout(120)?;
        assert_eq!(timer.read_timeout()?, 30);
        Ok(())
    }

    #[test]
    fn test_rejecting_driver_keeps_previous_timeout() {
        let mut timer = SimWatchdogTimer::with_timeout(20).rejecting_set_timeout();
        assert!(matches!(
            timer.set_timeout(45),
            Err(TimerError::SetTimeout(_))
        ));
        assert!(matches!(timer.read_timeout(), Ok(20)));
    }

    #[test]
    fn test_failing_read_is_distinct_error() {
        let mut timer = SimWatchdogTimer::with_timeout(20).failing_read_timeout();
        assert!(matches!(
            timer.read_timeout(),
            Err(TimerError::ReadTimeout(_))
        ));
    }

    #[test]
    fn test_disable_writes_magic_and_closes() -> TimerResult<()> {
        let timer = SimWatchdogTimer::with_timeout(20);
        let probe = timer.probe();
        timer.disable()?;
        assert!(probe.magic_close_written());
        assert!(probe.is_closed());
        assert!(!probe.left_armed());
        Ok(())
    }

    #[test]
    fn test_dropped_timer_leaves_device_armed() {
        let timer = SimWatchdogTimer::with_timeout(20);
        let probe = timer.probe();
        drop(timer);
        assert!(probe.left_armed());
    }
}
