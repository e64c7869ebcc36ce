//! Kick-interval negotiation.
//!
//! The driver may silently clamp a requested timeout, so the
//! effective kick interval is always derived from the timeout read
//! back from the device after the set attempt, never from the
//! request. Negotiation is a pure function; warnings are returned to
//! the caller for logging rather than logged here.

use crate::config::DEFAULT_KICK_INTERVAL_SECS;

/// The timer's reported timeout, post set-attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutReading {
    /// The driver reported this timeout in seconds.
    Known(u32),
    /// The driver could not report its timeout.
    ///
    /// A distinct case, never coerced to zero: the fallback interval
    /// applies instead.
    Unknown,
}

/// A non-fatal finding from negotiation, logged but never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginWarning {
    /// The explicit kick interval leaves no margin: the hardware
    /// would reboot the host before (or exactly when) the next kick
    /// lands.
    IntervalExceedsTimeout {
        /// Explicit interval supplied by the operator, in seconds.
        interval_secs: u32,
        /// Timeout the driver reported, in seconds.
        timeout_secs: u32,
    },
    /// The reported timeout halves to zero, so the derived interval
    /// is pinned at one second and eats the whole timeout.
    TimeoutTooShortToHalve {
        /// Timeout the driver reported, in seconds.
        timeout_secs: u32,
    },
}

impl std::fmt::Display for MarginWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IntervalExceedsTimeout {
                interval_secs,
                timeout_secs,
            } => write!(
                f,
                "watchdog timeout <= kick interval: {timeout_secs} <= {interval_secs}"
            ),
            Self::TimeoutTooShortToHalve { timeout_secs } => write!(
                f,
                "watchdog timeout {timeout_secs}s too short to halve, kicking every second"
            ),
        }
    }
}

/// The effective schedule for the remainder of the process lifetime.
///
/// Computed exactly once, at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KickSchedule {
    /// Seconds between consecutive kicks.
    pub interval_secs: u32,
    /// Margin findings for the caller to log.
    pub warnings: Vec<MarginWarning>,
}

/// Derive the effective kick interval.
///
/// Rules, in order:
/// 1. A known timeout with an explicit interval at or above it earns
///    a [`MarginWarning`], but the explicit interval is still used:
///    operator intent is never silently overridden.
/// 2. An explicit interval is used regardless of margin safety.
/// 3. With a known timeout and no explicit interval, the interval is
///    half the timeout (floor division). A half of zero is pinned to
///    one second and earns a [`MarginWarning`]: the schedule then has
///    no margin, and the operator should hear about it.
/// 4. With the timeout unknown and no explicit interval, the fixed
///    fallback [`DEFAULT_KICK_INTERVAL_SECS`] applies.
#[must_use]
pub fn negotiate_interval(
    reading: TimeoutReading,
    explicit_interval_secs: Option<u32>,
) -> KickSchedule {
    let mut warnings = Vec::new();

    if let (TimeoutReading::Known(timeout), Some(interval)) = (reading, explicit_interval_secs) {
        if interval >= timeout {
            warnings.push(MarginWarning::IntervalExceedsTimeout {
                interval_secs: interval,
                timeout_secs: timeout,
            });
        }
    }

    let interval_secs = match (explicit_interval_secs, reading) {
        (Some(interval), _) => interval,
        (None, TimeoutReading::Known(timeout)) => match timeout / 2 {
            0 => {
                warnings.push(MarginWarning::TimeoutTooShortToHalve {
                    timeout_secs: timeout,
                });
                1
            }
            half => half,
        },
        (None, TimeoutReading::Unknown) => DEFAULT_KICK_INTERVAL_SECS,
    };

    KickSchedule {
        interval_secs,
        warnings,
    }
}
