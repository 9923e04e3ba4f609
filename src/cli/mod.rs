//! The mutest command-line interface and embedding entry points.
//!
//! The `mutest` binary runs the harness's own suite. Host applications use
//! [`unit_test_check`] at the top of `main` so that starting them with
//! `--run-unit-tests` runs their suites instead of the application.

use std::ffi::OsString;

use clap::Parser;

use crate::check_eq;
use crate::cli::args::{TestArgs, RUN_UNIT_TESTS, RUN_UNIT_TESTS_ALIAS};
use crate::config::Preferences;
use crate::harness::Runner;
use crate::selftest;

pub mod args;
pub mod output;

/// Whether the first argument after the program name asks for test mode.
pub fn should_run_tests<S: AsRef<str>>(args: &[S]) -> bool {
    args.get(1)
        .map(|arg| matches!(arg.as_ref(), RUN_UNIT_TESTS | RUN_UNIT_TESTS_ALIAS))
        .unwrap_or(false)
}

/// Parses test-mode flags from a full argument list, program name included.
pub fn parse_preferences<I, T>(args: I) -> Result<Preferences, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = TestArgs::try_parse_from(args)?;
    Ok(args.preferences())
}

/// Runs `suite` and exits if the arguments ask for test mode, otherwise returns.
pub fn unit_test_check<S, F>(args: &[S], suite: F)
where
    S: AsRef<str>,
    F: FnOnce(&mut Runner),
{
    if !should_run_tests(args) {
        return;
    }
    match parse_preferences(args.iter().map(|arg| arg.as_ref().to_owned())) {
        Ok(prefs) => run_unit_tests(prefs, suite),
        Err(err) => err.exit(),
    }
}

/// Runs `suite` on a fresh runner, prints the results, and exits with the
/// number of failed tests.
pub fn run_unit_tests<F>(prefs: Preferences, suite: F) -> !
where
    F: FnOnce(&mut Runner),
{
    let mut runner = Runner::new(prefs);
    suite(&mut runner);
    runner.exit()
}

/// The main entry point for the `mutest` binary.
pub fn run() -> ! {
    let args = TestArgs::parse();
    run_unit_tests(args.preferences(), |t| {
        // Outside any test a passing check is a no-op.
        check_eq!(t, 1, 1);
        selftest::run_selftests(t);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_needs_the_flag_first() {
        assert!(should_run_tests(&["host", "--run-unit-tests"]));
        assert!(should_run_tests(&["host", "--ctest", "-v"]));
        assert!(!should_run_tests(&["host", "-v", "--ctest"]));
        assert!(!should_run_tests(&["host"]));
        assert!(!should_run_tests::<&str>(&[]));
    }

    #[test]
    fn unit_test_check_returns_without_the_flag() {
        let mut ran = false;
        unit_test_check(&["host", "serve"], |_| ran = true);
        assert!(!ran);
    }

    #[test]
    fn preferences_come_from_flags() {
        let prefs = parse_preferences(["host", "--ctest", "-v"]).expect("valid flags");
        assert_eq!(prefs.verbosity, 1);
    }
}
