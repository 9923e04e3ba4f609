//! The test context stack and its bookkeeping.
//!
//! A test is a closure run through [`Runner::test`]. Tests nest freely; a
//! failing assertion always aborts the innermost running test and execution
//! continues after that test's scope. Suites are ordinary functions taking
//! `&mut Runner`, so they can be parameterized and stepped through in a
//! debugger:
//!
//! ```rust,no_run
//! use mutest::{check_eq, Preferences, Runner};
//!
//! fn buffer_suite(t: &mut Runner, size: usize) {
//!     t.test("allocates", |t| {
//!         let buf = vec![0u8; size];
//!         check_eq!(t, buf.len(), size);
//!     });
//! }
//!
//! let mut runner = Runner::new(Preferences::default());
//! buffer_suite(&mut runner, 1024);
//! buffer_suite(&mut runner, 0);
//! runner.exit();
//! ```
//!
//! Aborts travel as unwinds, so a binary that links this crate must keep
//! `panic = "unwind"`. Under `panic = "abort"` the first failing assertion
//! ends the process.

use std::fmt;

pub mod context;
pub mod metrics;
pub mod runner;

pub use context::{AssertionContext, TestContext, TestState};
pub use metrics::Metrics;
pub use runner::Runner;

/// Reported name for a test entered with an empty name.
pub const UNNAMED: &str = "(unnamed)";

/// Where an assertion was written: file, line, and enclosing function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site {
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
}

impl Site {
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} in {}()", self.file, self.line, self.function)
    }
}

/// How a finished test was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    Passed,
    Failed,
}

impl TestOutcome {
    pub fn passed(self) -> bool {
        self == TestOutcome::Passed
    }
}

/// Reduces the type name of a marker fn nested in a function to the name of
/// that function, skipping any closures in between.
///
/// `mutest::selftest::int_suite::{{closure}}::f` becomes `int_suite`.
#[doc(hidden)]
pub fn enclosing_function(marker: &'static str) -> &'static str {
    let mut path = marker.strip_suffix("::f").unwrap_or(marker);
    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }
    path.rsplit("::").next().unwrap_or(path)
}

#[doc(hidden)]
pub fn type_name_of<T>(_: T) -> &'static str {
    std::any::type_name::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enclosing_function_strips_marker_and_closures() {
        assert_eq!(
            enclosing_function("mutest::selftest::int_suite::{{closure}}::f"),
            "int_suite"
        );
        assert_eq!(enclosing_function("app::main::f"), "main");
        assert_eq!(enclosing_function("main::{{closure}}::{{closure}}::f"), "main");
    }

    #[test]
    fn here_names_the_calling_function() {
        let site = crate::here!();
        assert_eq!(site.function, "here_names_the_calling_function");
        assert_eq!(site.file, file!());
    }

    #[test]
    fn here_inside_a_closure_names_the_outer_function() {
        let site = (|| crate::here!())();
        assert_eq!(site.function, "here_inside_a_closure_names_the_outer_function");
    }

    #[test]
    fn site_display_format() {
        let site = Site::new("t.rs", 12, "suite");
        assert_eq!(site.to_string(), "t.rs:12 in suite()");
    }
}
