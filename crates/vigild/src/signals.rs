//! Termination signal wiring.
//!
//! Only installed when safe exit is armed; otherwise SIGINT and
//! SIGTERM keep their default disposition and the timer stays armed
//! when the process dies (the fail-safe posture).
//!
//! The watcher task does the minimal signal-side work: one state
//! transition plus a wakeup. The disable sequence itself runs on the
//! scheduler's task.

use std::io;

use tokio::signal::unix::{SignalKind, signal};
use tracing::debug;

use vigil_core::ShutdownHandler;

/// Spawn a task that forwards SIGINT/SIGTERM to the shutdown handler.
///
/// Must be called from within the runtime.
pub fn watch(handler: ShutdownHandler) -> io::Result<()> {
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    tokio::spawn(async move {
        tokio::select! {
            _ = interrupt.recv() => debug!("SIGINT received"),
            _ = terminate.recv() => debug!("SIGTERM received"),
        }
        handler.request();
    });

    Ok(())
}
