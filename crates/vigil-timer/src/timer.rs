//! Watchdog timer trait definition.
//!
//! This module provides the core [`WatchdogTimer`] trait that the
//! guardian session and kick scheduler are written against.

use crate::error::TimerResult;

/// Well-known device node for the kernel watchdog interface.
pub const WATCHDOG_DEVICE: &str = "/dev/watchdog";

/// The magic-close byte.
///
/// Writing this byte to the device before closing it tells drivers
/// that honor magic close to stop counting down instead of treating
/// the close as an abandoned watchdog.
pub const WATCHDOG_MAGIC: u8 = b'V';

/// A watchdog timer that must be kicked periodically to keep the
/// host from being reset.
///
/// # Contract
///
/// 1. The timer counts down from its current timeout; `kick()` resets
///    the countdown without resetting the host.
/// 2. `set_timeout()` is a request: the driver may accept, reject, or
///    silently clamp it. The value reported by `read_timeout()` after
///    a set attempt is the negotiated truth; implementations must not
///    assume request and read-back are equal.
/// 3. `disable()` consumes the timer: the handle is closed and never
///    reopened. Dropping a timer without calling `disable()` leaves
///    the hardware armed.
pub trait WatchdogTimer {
    /// Send a keep-alive request, resetting the countdown.
    ///
    /// Kicks are frequent, cheap, and idempotent; callers treat a
    /// failure as fire-and-forget (logged at debug level, never
    /// retried individually; the next scheduled kick is the retry).
    ///
    /// # Errors
    ///
    /// Returns an error if the keep-alive request did not reach the
    /// driver.
    fn kick(&mut self) -> TimerResult<()>;

    /// Ask the driver to adopt the given timeout in seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver rejected the request. Callers
    /// log a warning and continue with whatever `read_timeout()`
    /// subsequently reports.
    fn set_timeout(&mut self, secs: u32) -> TimerResult<()>;

    /// Query the timer's actual current timeout in seconds.
    ///
    /// This is the post-set-attempt read-back; it is the only value
    /// the interval negotiation may trust.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver cannot report its timeout.
    /// Callers must treat that as a distinct "unknown" case, never
    /// coerce it to zero.
    fn read_timeout(&mut self) -> TimerResult<u32>;

    /// Disarm the timer and close the handle.
    ///
    /// Writes the magic-close byte, then closes the device. Only
    /// invoked on the safe-exit path; every other termination leaves
    /// the timer armed on purpose.
    ///
    /// # Errors
    ///
    /// Returns an error if the magic-close write or the close failed.
    fn disable(self) -> TimerResult<()>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_byte_is_v() {
        assert_eq!(WATCHDOG_MAGIC, b'V');
    }

    #[test]
    fn test_device_node_is_fixed() {
        assert_eq!(WATCHDOG_DEVICE, "/dev/watchdog");
    }
}
