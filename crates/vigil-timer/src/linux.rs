//! Linux `/dev/watchdog` implementation.
//!
//! Drives the kernel watchdog interface with the `WDIOC_*` ioctls.
//! All `unsafe` in the crate is confined to this module.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{TimerError, TimerResult};
use crate::timer::{WATCHDOG_MAGIC, WatchdogTimer};

// Request values from <linux/watchdog.h>.
const WDIOC_KEEPALIVE: libc::c_ulong = 0x8004_5705; // _IOR('W', 5, int)
const WDIOC_SETTIMEOUT: libc::c_ulong = 0xc004_5706; // _IOWR('W', 6, int)
const WDIOC_GETTIMEOUT: libc::c_ulong = 0x8004_5707; // _IOR('W', 7, int)

/// Exclusively-owned handle to a kernel watchdog device.
///
/// Opening the device arms the timer on most drivers, so a
/// `LinuxWatchdogTimer` must be kicked from the moment it exists.
/// The handle is opened write-only, exactly once per process, and is
/// closed either by [`WatchdogTimer::disable`] (magic close, timer
/// disarmed) or by process death (timer left armed).
#[derive(Debug)]
pub struct LinuxWatchdogTimer {
    file: File,
    path: PathBuf,
}

impl LinuxWatchdogTimer {
    /// Open the watchdog device node write-only.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::Open`] when the path does not exist or
    /// is not accessible. This is fatal upstream: without the device
    /// no liveness guarantee can be offered.
    pub fn open(path: impl AsRef<Path>) -> TimerResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .write(true)
            .open(&path)
            .map_err(|source| TimerError::Open {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), "opened watchdog device");
        Ok(Self { file, path })
    }

    /// Path of the device node this handle was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ioctl_int(&self, request: libc::c_ulong, arg: &mut libc::c_int) -> io::Result<()> {
        let fd = self.file.as_raw_fd();
        // SAFETY: `fd` is a valid open descriptor owned by `self.file`
        // for the lifetime of this call, and `arg` points to a live,
        // properly aligned c_int as every WDIOC_* int ioctl expects.
        let ret = unsafe { libc::ioctl(fd, request as _, arg) };
        if ret == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}

impl WatchdogTimer for LinuxWatchdogTimer {
    fn kick(&mut self) -> TimerResult<()> {
        debug!("kicking watchdog");
        let mut dummy: libc::c_int = 0;
        self.ioctl_int(WDIOC_KEEPALIVE, &mut dummy)
            .map_err(TimerError::Kick)
    }

    fn set_timeout(&mut self, secs: u32) -> TimerResult<()> {
        debug!(secs, "setting watchdog timeout");
        let mut arg = libc::c_int::try_from(secs).unwrap_or(libc::c_int::MAX);
        self.ioctl_int(WDIOC_SETTIMEOUT, &mut arg)
            .map_err(TimerError::SetTimeout)?;
        // The driver reports the value it actually applied.
        debug!(applied = arg, "driver acknowledged timeout");
        Ok(())
    }

    fn read_timeout(&mut self) -> TimerResult<u32> {
        let mut secs: libc::c_int = 0;
        self.ioctl_int(WDIOC_GETTIMEOUT, &mut secs)
            .map_err(TimerError::ReadTimeout)?;
        debug!(secs, "watchdog timeout read back");
        match u32::try_from(secs) {
            Ok(secs) => Ok(secs),
            Err(_) => Err(TimerError::ReadTimeout(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("driver reported nonsensical timeout {secs}"),
            ))),
        }
    }

    fn disable(mut self) -> TimerResult<()> {
        debug!("safe exit, disabling watchdog");
        self.file
            .write_all(&[WATCHDOG_MAGIC])
            .map_err(TimerError::Disable)?;
        // Dropping `self.file` closes the handle; the magic byte we
        // just wrote tells the driver this close is intentional.
        Ok(())
    }
}
