//! Convenient re-exports for common watchdog timer usage.

pub use crate::error::{TimerError, TimerResult};
pub use crate::sim::{SimProbe, SimWatchdogTimer};
pub use crate::timer::{WATCHDOG_DEVICE, WATCHDOG_MAGIC, WatchdogTimer};

#[cfg(target_os = "linux")]
pub use crate::LinuxWatchdogTimer;
