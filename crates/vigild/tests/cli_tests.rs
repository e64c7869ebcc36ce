//! End-to-end tests for the vigild command surface and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn vigild() -> Result<Command, Box<dyn std::error::Error>> {
    Ok(Command::cargo_bin("vigild")?)
}

#[test]
fn help_exits_zero_and_lists_the_flags() -> TestResult {
    vigild()?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--safe-exit"))
        .stdout(predicate::str::contains("--foreground"))
        .stdout(predicate::str::contains("--interval"));
    Ok(())
}

#[test]
fn short_help_matches_long_help_path() -> TestResult {
    vigild()?.arg("-h").assert().success();
    Ok(())
}

#[test]
fn version_exits_zero_and_prints_the_version() -> TestResult {
    vigild()?
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn unknown_flag_exits_one_with_usage() -> TestResult {
    vigild()?
        .arg("--definitely-not-a-flag")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
    Ok(())
}

#[test]
fn malformed_timeout_exits_one() -> TestResult {
    vigild()?.args(["-w", "soon"]).assert().failure().code(1);
    Ok(())
}

#[test]
fn zero_timeout_exits_one() -> TestResult {
    vigild()?
        .args(["-f", "-w", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("greater than 0"));
    Ok(())
}

/// Scenario: the device path is absent. The process exits non-zero
/// before any negotiation or scheduling happens; no kicks are issued.
#[test]
fn missing_device_is_fatal_before_any_scheduling() -> TestResult {
    vigild()?
        .args(["-f", "--device", "/nonexistent/watchdog"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed opening watchdog device"));
    Ok(())
}

/// Scenario: backgrounded with a logfile. The parent exits zero as
/// soon as the fork lands; the detached child reports its fatal
/// device-open failure through the logfile instead of a terminal.
#[test]
fn backgrounding_reports_startup_failure_in_the_logfile() -> TestResult {
    let dir = tempfile::tempdir()?;
    let logfile = dir.path().join("vigild.log");

    vigild()?
        .arg("-l")
        .arg(&logfile)
        .args(["--device", "/nonexistent/watchdog"])
        .assert()
        .success();

    // The child writes after the parent has already returned; poll
    // briefly for the message to land.
    let mut contents = String::new();
    for _ in 0..50 {
        contents = std::fs::read_to_string(&logfile).unwrap_or_default();
        if contents.contains("failed opening watchdog device") {
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(100));
    }
    assert!(contents.contains("failed opening watchdog device"));
    assert!(contents.contains("/nonexistent/watchdog"));
    Ok(())
}

#[test]
fn device_override_works_through_the_environment() -> TestResult {
    vigild()?
        .arg("-f")
        .env("VIGILD_DEVICE", "/nonexistent/watchdog")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("/nonexistent/watchdog"));
    Ok(())
}
