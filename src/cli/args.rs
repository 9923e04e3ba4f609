//! Defines the command-line arguments for running unit tests.
//!
//! This module uses the `clap` crate with its "derive" feature. Host
//! applications that embed test suites parse the same flags, so a binary can
//! be started normally or with `--run-unit-tests` to run its suites instead.

use clap::{ArgAction, Parser};

use crate::config::{ColorMode, Preferences};

/// Flag that switches an embedding application into test mode.
pub const RUN_UNIT_TESTS: &str = "--run-unit-tests";
/// Short spelling of [`RUN_UNIT_TESTS`].
pub const RUN_UNIT_TESTS_ALIAS: &str = "--ctest";

/// The test-mode argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "mutest",
    version,
    about = "Run unit tests whose failures abort only the innermost test."
)]
pub struct TestArgs {
    /// Run the unit tests and exit (accepted for parity with embedding hosts).
    #[arg(long = "run-unit-tests", visible_alias = "ctest")]
    pub run_unit_tests: bool,

    /// Trace each test; repeat to also trace each assertion.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print failure messages even in inverted tests, where failing is expected.
    #[arg(short = 'f', long)]
    pub show_failures: bool,

    /// When to colorize output.
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

impl TestArgs {
    pub fn preferences(&self) -> Preferences {
        Preferences {
            verbosity: self.verbose,
            show_failures: self.show_failures,
            color: self.color,
        }
    }
}
