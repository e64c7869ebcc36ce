//! Convenient re-exports for guardian usage.

pub use crate::config::{DEFAULT_KICK_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS, DaemonConfig};
pub use crate::error::{GuardianError, GuardianResult};
pub use crate::guardian::{ExitReason, Guardian};
pub use crate::negotiate::{KickSchedule, MarginWarning, TimeoutReading, negotiate_interval};
pub use crate::scheduler::KickScheduler;
pub use crate::shutdown::{ShutdownHandler, ShutdownState};
