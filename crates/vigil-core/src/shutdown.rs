//! Safe-exit state machine and wakeup handle.
//!
//! Shutdown is a two-phase handoff. The signal-delivery path calls
//! [`ShutdownHandler::request`], which does only minimal work: one
//! atomic state transition plus a wakeup notification. The actual
//! disable-and-exit sequence runs on the scheduler's task once it
//! observes the request, so the disable write and the kick loop never
//! execute concurrently.
//!
//! # State Transition Diagram
//!
//! ```text
//! Inactive ──arm()──► Armed ──request()──► Disabling
//!                                              │
//!                                        (disable runs)
//!                                              │
//!                                              ▼
//!                                         Terminated
//! ```
//!
//! A handler that is never armed leaves signal disposition to the OS:
//! the process simply dies and the timer, left armed, reboots the
//! host after its timeout. That is the intentional fail-safe, not an
//! oversight.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use tokio::sync::Notify;

/// Safe-exit lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum ShutdownState {
    /// Safe exit was not requested; signals keep default disposition.
    #[default]
    Inactive = 0,
    /// Termination signals are being watched.
    Armed = 1,
    /// A signal arrived; the scheduler is about to disarm the timer.
    Disabling = 2,
    /// The timer was disarmed and the process is exiting cleanly.
    Terminated = 3,
}

impl ShutdownState {
    /// Convert from raw u32 value.
    #[must_use]
    pub fn from_raw(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Inactive),
            1 => Some(Self::Armed),
            2 => Some(Self::Disabling),
            3 => Some(Self::Terminated),
            _ => None,
        }
    }

    /// Get the state as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inactive => "Inactive",
            Self::Armed => "Armed",
            Self::Disabling => "Disabling",
            Self::Terminated => "Terminated",
        }
    }
}

impl std::fmt::Display for ShutdownState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shared handle onto the safe-exit state machine.
///
/// Cloned twice at most: once into the signal-watching task, once
/// into the scheduler. All transitions are atomic compare-exchanges,
/// so a burst of signals collapses into a single shutdown request.
#[derive(Debug, Clone)]
pub struct ShutdownHandler {
    state: Arc<AtomicU32>,
    wakeup: Arc<Notify>,
}

impl ShutdownHandler {
    /// Create a handler in the [`ShutdownState::Armed`] state.
    ///
    /// Arming only happens at startup, and only when the operator
    /// requested safe exit.
    #[must_use]
    pub fn armed() -> Self {
        Self {
            state: Arc::new(AtomicU32::new(ShutdownState::Armed as u32)),
            wakeup: Arc::new(Notify::new()),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ShutdownState {
        ShutdownState::from_raw(self.state.load(Ordering::Acquire))
            .unwrap_or(ShutdownState::Terminated)
    }

    /// Signal-delivery path: transition Armed → Disabling and wake
    /// the scheduler.
    ///
    /// Returns `true` on the first effective request; repeated
    /// deliveries are absorbed.
    pub fn request(&self) -> bool {
        let first = self
            .state
            .compare_exchange(
                ShutdownState::Armed as u32,
                ShutdownState::Disabling as u32,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok();
        if first {
            self.wakeup.notify_one();
        }
        first
    }

    /// Wait until a shutdown request arrives.
    ///
    /// Resolves immediately if the request already happened; this is
    /// the scheduler's second select branch.
    pub async fn requested(&self) {
        while self.state() == ShutdownState::Armed {
            self.wakeup.notified().await;
        }
    }

    /// Mark the disable sequence complete.
    ///
    /// Returns `true` when the transition Disabling → Terminated was
    /// taken.
    pub fn terminated(&self) -> bool {
        self.state
            .compare_exchange(
                ShutdownState::Disabling as u32,
                ShutdownState::Terminated as u32,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_armed_handler_starts_armed() {
        let handler = ShutdownHandler::armed();
        assert_eq!(handler.state(), ShutdownState::Armed);
    }

    #[test]
    fn test_first_request_transitions_to_disabling() {
        let handler = ShutdownHandler::armed();
        assert!(handler.request());
        assert_eq!(handler.state(), ShutdownState::Disabling);
    }

    #[test]
    fn test_repeated_signals_collapse() {
        let handler = ShutdownHandler::armed();
        assert!(handler.request());
        assert!(!handler.request());
        assert!(!handler.request());
        assert_eq!(handler.state(), ShutdownState::Disabling);
    }

    #[test]
    fn test_terminated_requires_disabling_first() {
        let handler = ShutdownHandler::armed();
        assert!(!handler.terminated());
        handler.request();
        assert!(handler.terminated());
        assert_eq!(handler.state(), ShutdownState::Terminated);
    }

    #[test]
    fn test_state_round_trips_through_raw() {
        for state in [
            ShutdownState::Inactive,
            ShutdownState::Armed,
            ShutdownState::Disabling,
            ShutdownState::Terminated,
        ] {
            assert_eq!(ShutdownState::from_raw(state as u32), Some(state));
        }
        assert_eq!(ShutdownState::from_raw(42), None);
    }

    #[tokio::test]
    async fn test_requested_resolves_after_request() {
        let handler = ShutdownHandler::armed();
        let waiter = handler.clone();
        let wait = tokio::spawn(async move { waiter.requested().await });
        handler.request();
        assert!(wait.await.is_ok());
    }

    #[tokio::test]
    async fn test_requested_resolves_immediately_when_already_requested() {
        let handler = ShutdownHandler::armed();
        handler.request();
        handler.requested().await;
    }
}
