/// Largest exit code produced by a run, so the status stays in a conventional byte range.
pub const MAX_EXIT_CODE: usize = 100;

/// Counters for a whole run. Only the runner mutates them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Metrics {
    /// Tests attempted.
    pub tests_run: usize,
    pub test_successes: usize,
    pub test_failures: usize,
    /// Assertions attempted inside a test.
    pub assertions_run: usize,
    /// Assertions that passed (inside an inverted test: assertions that failed as expected).
    pub assertion_successes: usize,
    pub assertion_failures: usize,
}

impl Metrics {
    pub fn has_failures(&self) -> bool {
        self.test_failures > 0
    }

    /// Number of failed tests, capped at [`MAX_EXIT_CODE`].
    pub fn exit_code(&self) -> i32 {
        self.test_failures.min(MAX_EXIT_CODE) as i32
    }

    /// The one-line result printed at the end of a run.
    pub fn summary(&self) -> String {
        if !self.has_failures() {
            return format!(
                "All OK.  {} run, {} ({}).",
                counted(self.tests_run, "test", "tests"),
                counted(self.test_successes, "success", "successes"),
                counted(self.assertions_run, "assertion", "assertions"),
            );
        }
        format!(
            "ERROR: {} in {} run!",
            counted(self.test_failures, "failure", "failures"),
            counted(self.tests_run, "test", "tests"),
        )
    }
}

fn counted(n: usize, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}
