//! Process backgrounding.
//!
//! Classic double-step daemonization is overkill here; a single fork
//! plus `setsid` detaches from the controlling terminal, matching
//! what init systems expect from a self-backgrounding daemon. All
//! `unsafe` in the binary lives in this module.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::AsRawFd;
use std::path::Path;

/// Which side of the fork we are on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fork {
    /// Original process; should exit with success immediately.
    Parent,
    /// Detached daemon process; carries on to open the device.
    Child,
}

/// Fork into the background and detach stdio.
///
/// The child becomes a session leader, moves to `/`, reads stdin from
/// `/dev/null`, and sends stdout/stderr to `log_file` (appended,
/// created if missing) or to `/dev/null` when no logfile was given;
/// in the latter case daemon messages go to the journal instead.
///
/// Must run before the watchdog device is opened and while the
/// process is still single-threaded.
pub fn daemonize(log_file: Option<&Path>) -> io::Result<Fork> {
    // SAFETY: called from main before any threads or the async
    // runtime exist, so the child inherits a consistent
    // single-threaded image.
    let pid = unsafe { libc::fork() };
    if pid < 0 {
        return Err(io::Error::last_os_error());
    }
    if pid > 0 {
        return Ok(Fork::Parent);
    }

    // SAFETY: plain syscall wrapper, no pointers involved.
    if unsafe { libc::setsid() } < 0 {
        return Err(io::Error::last_os_error());
    }
    std::env::set_current_dir("/")?;

    let stdin = File::open("/dev/null")?;
    let sink = match log_file {
        Some(path) => OpenOptions::new().create(true).append(true).open(path)?,
        None => OpenOptions::new().write(true).open("/dev/null")?,
    };
    redirect(&stdin, libc::STDIN_FILENO)?;
    redirect(&sink, libc::STDOUT_FILENO)?;
    redirect(&sink, libc::STDERR_FILENO)?;

    Ok(Fork::Child)
}

fn redirect(file: &File, target: libc::c_int) -> io::Result<()> {
    // SAFETY: both descriptors are valid: `file` is open for the
    // duration of the call and `target` is one of the standard fds.
    let ret = unsafe { libc::dup2(file.as_raw_fd(), target) };
    if ret < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
