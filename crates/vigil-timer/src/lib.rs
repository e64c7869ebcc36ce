//! # vigil-timer
//!
//! Watchdog timer device layer for the vigil guardian daemon.
//!
//! This crate owns the interaction with a watchdog timer device:
//! - [`WatchdogTimer`] trait for timer implementations
//! - [`LinuxWatchdogTimer`] driving `/dev/watchdog` through the
//!   `WDIOC_*` ioctl interface
//! - [`SimWatchdogTimer`] for testing and hardware-free environments
//!
//! ## Ownership Guarantees
//!
//! - At most one open handle to the device exists per process
//! - Once a handle is closed it is never reopened
//! - A process that dies without calling [`WatchdogTimer::disable`]
//!   leaves the timer armed, so the kernel reboots the host when the
//!   timeout elapses (the deliberate fail-safe posture)
//!
//! ## Example
//!
//! ```rust
//! use vigil_timer::prelude::*;
//!
//! let mut timer = SimWatchdogTimer::with_timeout(20);
//! assert!(timer.set_timeout(30).is_ok());
//! assert!(timer.kick().is_ok());
//! let read_back = timer.read_timeout();
//! assert!(read_back.is_ok());
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod prelude;
pub mod sim;
pub mod timer;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "linux")]
pub use linux::LinuxWatchdogTimer;

pub use error::{TimerError, TimerResult};
pub use sim::SimWatchdogTimer;
pub use timer::{WATCHDOG_DEVICE, WATCHDOG_MAGIC, WatchdogTimer};
