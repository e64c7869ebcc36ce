//! vigild - userspace watchdog guardian daemon
//!
//! Keeps the kernel watchdog timer continuously fed so an
//! unresponsive host is forcibly reset, while allowing a reset-free
//! shutdown when the operator stops the daemon intentionally with
//! `--safe-exit` armed.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

#[cfg(not(target_os = "linux"))]
compile_error!("vigild requires the Linux watchdog device interface");

mod daemon;
mod logging;
mod signals;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing::{error, info};

use vigil_core::prelude::*;
use vigil_timer::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "vigild")]
#[command(version)]
#[command(disable_version_flag = true)]
#[command(about = "A watchdog guardian that kicks /dev/watchdog every few seconds")]
#[command(long_about = "
vigild keeps the hardware (or kernel-emulated) watchdog timer fed so a
hung host reboots itself. Stopping vigild without --safe-exit leaves
the timer armed on purpose: the host will reset when it expires.
")]
struct Cli {
    /// Start in foreground (background is default)
    #[arg(short = 'f', long)]
    foreground: bool,

    /// Log to <FILE> when backgrounding, instead of the journal
    #[arg(short = 'l', long = "logfile", value_name = "FILE")]
    logfile: Option<PathBuf>,

    /// Set the HW watchdog timeout to <SEC> seconds
    #[arg(short = 'w', long = "timeout", value_name = "SEC", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u32,

    /// Set watchdog kick interval to <SEC> seconds
    #[arg(short = 'k', long = "interval", value_name = "SEC")]
    interval: Option<u32>,

    /// Disable watchdog on exit from SIGINT/SIGTERM
    #[arg(short = 's', long = "safe-exit")]
    safe_exit: bool,

    /// Verbose operation, noisy output suitable for debugging
    #[arg(short = 'V', long)]
    verbose: bool,

    /// Display daemon version and exit
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    /// Device node override (for testing against a fake device)
    #[arg(long, value_name = "PATH", env = "VIGILD_DEVICE", hide = true)]
    device: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> GuardianResult<DaemonConfig> {
        let mut builder = DaemonConfig::builder()
            .timeout_secs(self.timeout)
            .kick_interval_secs(self.interval)
            .safe_exit(self.safe_exit)
            .verbose(self.verbose)
            .foreground(self.foreground)
            .log_file(self.logfile);
        if let Some(device) = self.device {
            builder = builder.device(device);
        }
        builder.build()
    }
}

fn main() -> ExitCode {
    // Argument errors exit 1 (not clap's default 2); help and
    // version are success paths.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let ok = matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            );
            let _ = err.print();
            return if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE };
        }
    };

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("vigild: {err}");
            return ExitCode::FAILURE;
        }
    };

    // Background before the device is opened, so the handle is not
    // duplicated across the process split.
    if !config.foreground {
        match daemon::daemonize(config.log_file.as_deref()) {
            Ok(daemon::Fork::Parent) => return ExitCode::SUCCESS,
            Ok(daemon::Fork::Child) => {}
            Err(err) => {
                eprintln!("vigild: failed to background: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    let sink = logging::LogSink::select(config.foreground, config.log_file.as_deref());
    logging::init(config.verbose, sink);

    match run(config) {
        Ok(ExitReason::Disarmed) => {
            info!("watchdog disarmed, exiting");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: DaemonConfig) -> anyhow::Result<ExitReason> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    runtime.block_on(async {
        info!(
            version = env!("CARGO_PKG_VERSION"),
            device = %config.device.display(),
            "starting vigild"
        );

        let timer = LinuxWatchdogTimer::open(&config.device)?;

        let shutdown = if config.safe_exit {
            let handler = ShutdownHandler::armed();
            signals::watch(handler.clone()).context("failed to install signal handling")?;
            Some(handler)
        } else {
            None
        };

        let reason = Guardian::new(timer, config, shutdown).run().await?;
        Ok(reason)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::try_parse_from(["vigild"])?;
        assert!(!cli.foreground);
        assert!(!cli.safe_exit);
        assert!(!cli.verbose);
        assert_eq!(cli.timeout, 20);
        assert_eq!(cli.interval, None);
        assert_eq!(cli.logfile, None);
        Ok(())
    }

    #[test]
    fn test_short_flags_match_historical_surface() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::try_parse_from([
            "vigild", "-f", "-s", "-V", "-w", "30", "-k", "7", "-l", "/tmp/wd.log",
        ])?;
        assert!(cli.foreground);
        assert!(cli.safe_exit);
        assert!(cli.verbose);
        assert_eq!(cli.timeout, 30);
        assert_eq!(cli.interval, Some(7));
        assert_eq!(cli.logfile, Some(PathBuf::from("/tmp/wd.log")));
        Ok(())
    }

    #[test]
    fn test_lowercase_v_is_version_not_verbose() {
        let err = Cli::try_parse_from(["vigild", "-v"]);
        assert!(matches!(
            err.map(|_| ()),
            Err(e) if e.kind() == clap::error::ErrorKind::DisplayVersion
        ));
    }

    #[test]
    fn test_config_mapping_keeps_device_default() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::try_parse_from(["vigild", "-w", "30"])?;
        let config = cli.into_config()?;
        assert_eq!(config.device, PathBuf::from(WATCHDOG_DEVICE));
        assert_eq!(config.timeout_secs, 30);
        Ok(())
    }

    #[test]
    fn test_zero_timeout_rejected_at_config_build() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::try_parse_from(["vigild", "-w", "0"])?;
        assert!(cli.into_config().is_err());
        Ok(())
    }
}
