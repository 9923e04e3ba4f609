//! Fatal usage errors for the mutest harness.
//!
//! # Overview
//!
//! Assertion failures are not errors in this crate: they are reported and
//! unwind to the nearest enclosing test. The types here cover the other
//! class of failure, where the harness itself is being driven incorrectly
//! (an assertion fails with no test to abort, an assertion is never
//! resolved, the context stack is corrupted). Those are programming errors
//! in the test suite, so the runner renders them as `miette` diagnostics and
//! terminates the process with the exit code documented on each variant.
//!
//! | Variant | Exit code |
//! |---|---|
//! | [`HarnessError::UnwrappedAssertion`] | 1 |
//! | [`HarnessError::StackMismatch`] | 241 |
//! | [`HarnessError::AssertionNotPrepared`] | 242 |
//! | [`HarnessError::NoActiveTest`] | 243 |
//! | [`HarnessError::UnresolvedAssertion`] | 244 |

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme};
use thiserror::Error;

/// Exit code for a failing assertion with no enclosing test: a single failure.
pub const EXIT_UNWRAPPED_ASSERTION: i32 = 1;
pub const EXIT_STACK_MISMATCH: i32 = 241;
pub const EXIT_ASSERTION_NOT_PREPARED: i32 = 242;
pub const EXIT_NO_ACTIVE_TEST: i32 = 243;
pub const EXIT_UNRESOLVED_ASSERTION: i32 = 244;

/// A condition that stops the whole run.
#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error("assertion at {site} failed outside of any test")]
    #[diagnostic(
        code(mutest::unwrapped_assertion),
        help("wrap the assertion in `Runner::test` so a failure aborts only that test")
    )]
    UnwrappedAssertion { site: String },

    #[error("previous assertion at {pending} hasn't reported a result; unable to start {starting}")]
    #[diagnostic(
        code(mutest::unresolved_assertion),
        help("every `prepare` must be followed by `succeeded` or `failed`")
    )]
    UnresolvedAssertion { pending: String, starting: String },

    #[error("test {action} requested but no test is running")]
    #[diagnostic(code(mutest::no_active_test))]
    NoActiveTest { action: &'static str },

    #[error("assertion {outcome} reported without a prepared assertion")]
    #[diagnostic(
        code(mutest::assertion_not_prepared),
        help("call `prepare` before reporting an assertion result")
    )]
    AssertionNotPrepared { outcome: &'static str },

    #[error("abort addressed to test depth {found} reached the test at depth {expected}")]
    #[diagnostic(code(mutest::stack_mismatch))]
    StackMismatch { expected: usize, found: usize },
}

impl HarnessError {
    /// The process exit status used when this error terminates a run.
    pub fn exit_code(&self) -> i32 {
        match self {
            HarnessError::UnwrappedAssertion { .. } => EXIT_UNWRAPPED_ASSERTION,
            HarnessError::UnresolvedAssertion { .. } => EXIT_UNRESOLVED_ASSERTION,
            HarnessError::NoActiveTest { .. } => EXIT_NO_ACTIVE_TEST,
            HarnessError::AssertionNotPrepared { .. } => EXIT_ASSERTION_NOT_PREPARED,
            HarnessError::StackMismatch { .. } => EXIT_STACK_MISMATCH,
        }
    }

    /// Renders the error as a full `miette` report. Lines are not wrapped;
    /// the output sink decides on colour.
    pub fn render(&self) -> String {
        let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
            .with_width(usize::MAX);
        let mut rendered = String::new();
        match handler.render_report(&mut rendered, self) {
            Ok(()) => rendered,
            Err(_) => self.to_string(),
        }
    }
}
