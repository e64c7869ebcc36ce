//! Log sink setup.
//!
//! Three sinks, picked once at startup after any fork: stderr in the
//! foreground, a logfile when the daemonizer pointed stderr at one,
//! and the system journal when backgrounded without a logfile so
//! startup warnings and fatal errors are never dropped.

use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Where daemon output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// The process stderr: a terminal in the foreground, or the
    /// logfile the daemonizer redirected stderr to.
    Stderr,
    /// The system journal; used when backgrounded with no logfile.
    Journal,
}

impl LogSink {
    /// Pick the sink for the given run mode.
    #[must_use]
    pub fn select(foreground: bool, log_file: Option<&Path>) -> Self {
        if foreground || log_file.is_some() {
            Self::Stderr
        } else {
            Self::Journal
        }
    }
}

/// Initialize the tracing subscriber.
///
/// `--verbose` selects debug-level output, otherwise info. The
/// `VIGILD_LOG` environment variable overrides both for targeted
/// debugging. When the journal socket cannot be reached, output
/// falls back to stderr.
pub fn init(verbose: bool, sink: LogSink) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("VIGILD_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    if sink == LogSink::Journal
        && let Ok(journal) = tracing_journald::layer()
    {
        tracing_subscriber::registry()
            .with(filter)
            .with(journal)
            .init();
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_foreground_logs_to_stderr() {
        assert_eq!(LogSink::select(true, None), LogSink::Stderr);
    }

    #[test]
    fn test_logfile_logs_through_stderr_redirection() {
        let path = PathBuf::from("/var/log/vigild.log");
        assert_eq!(LogSink::select(false, Some(&path)), LogSink::Stderr);
        assert_eq!(LogSink::select(true, Some(&path)), LogSink::Stderr);
    }

    #[test]
    fn test_backgrounded_without_logfile_logs_to_journal() {
        assert_eq!(LogSink::select(false, None), LogSink::Journal);
    }
}
