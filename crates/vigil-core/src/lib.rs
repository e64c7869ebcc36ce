//! # vigil-core
//!
//! Timeout negotiation, kick scheduling and safe-exit handling for
//! the vigil guardian daemon.
//!
//! The crate is organized into focused modules:
//!
//! - [`config`] - Immutable daemon configuration
//! - [`negotiate`] - Kick-interval negotiation against the timeout
//!   the driver actually applied
//! - [`scheduler`] - The unbounded keep-alive loop
//! - [`shutdown`] - Safe-exit state machine and wakeup handle
//! - [`guardian`] - The session object tying the above together
//! - [`error`] - Guardian-specific error types
//!
//! ## Design
//!
//! The guardian trusts the timeout it reads back from the driver,
//! never the one it requested; drivers clamp silently. The margin
//! between kick interval and hardware timeout is warned about but
//! never enforced: operator configuration is authoritative.
//!
//! Shutdown is a two-phase handoff. Signal delivery only flips the
//! [`shutdown::ShutdownState`] machine and wakes the scheduler; the
//! actual disable-and-exit sequence runs on the scheduler's task, so
//! the disable write and the kick loop never execute concurrently.
//!
//! ## Example
//!
//! ```rust
//! use vigil_core::prelude::*;
//!
//! let schedule = negotiate_interval(TimeoutReading::Known(21), None);
//! assert_eq!(schedule.interval_secs, 10);
//! assert!(schedule.warnings.is_empty());
//! ```

#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod guardian;
pub mod negotiate;
pub mod scheduler;
pub mod shutdown;

pub mod prelude;

pub use config::{DEFAULT_KICK_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS, DaemonConfig};
pub use error::{GuardianError, GuardianResult};
pub use guardian::{ExitReason, Guardian};
pub use negotiate::{KickSchedule, MarginWarning, TimeoutReading, negotiate_interval};
pub use scheduler::KickScheduler;
pub use shutdown::{ShutdownHandler, ShutdownState};
