use std::any::Any;
use std::panic::{self, AssertUnwindSafe, Location};

use crate::cli::output::{OutputSink, TerminalSink, Tone};
use crate::config::{Preferences, TRACE_ASSERTIONS, TRACE_TESTS};
use crate::diagnostics::HarnessError;

use super::{AssertionContext, Metrics, Site, TestContext, TestOutcome, TestState};

/// Unwind payload for a failed assertion, addressed to the test at `depth`.
///
/// Raised with `resume_unwind` so the panic hook stays quiet.
struct Abort {
    depth: usize,
}

/// Owns the test context stack, the in-flight assertion, and the metrics
/// for one run.
///
/// The lifecycle is explicit: create a runner, pass it to suites, then call
/// [`Runner::exit`] (or read [`Runner::metrics`] when embedding).
pub struct Runner {
    prefs: Preferences,
    metrics: Metrics,
    stack: Vec<TestContext>,
    pending: Option<AssertionContext>,
    out: Box<dyn OutputSink>,
    err: Box<dyn OutputSink>,
    terminate: fn(i32) -> !,
    /// Set once a fatal error has handed control to `terminate`.
    terminating: bool,
}

impl Runner {
    /// A runner printing to stdout and stderr.
    pub fn new(prefs: Preferences) -> Self {
        let out = TerminalSink::stdout(prefs.color.choice_for(atty::Stream::Stdout));
        let err = TerminalSink::stderr(prefs.color.choice_for(atty::Stream::Stderr));
        Self::with_sinks(prefs, Box::new(out), Box::new(err))
    }

    /// A runner writing summaries to `out` and failures and traces to `err`.
    pub fn with_sinks(
        prefs: Preferences,
        out: Box<dyn OutputSink>,
        err: Box<dyn OutputSink>,
    ) -> Self {
        Self {
            prefs,
            metrics: Metrics::default(),
            stack: Vec::new(),
            pending: None,
            out,
            err,
            terminate: std::process::exit,
            terminating: false,
        }
    }

    /// Replaces the process termination used for fatal errors and [`Runner::exit`].
    ///
    /// A handler other than `std::process::exit` has to leave by unwinding.
    /// That unwind passes through every enclosing test scope untouched.
    pub fn with_exit_handler(mut self, terminate: fn(i32) -> !) -> Self {
        self.terminate = terminate;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn set_show_failures(&mut self, show: bool) {
        self.prefs.show_failures = show;
    }

    pub fn set_verbosity(&mut self, verbosity: u8) {
        self.prefs.verbosity = verbosity;
    }

    /// Number of tests currently running.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The innermost running test, if any.
    pub fn current_test(&self) -> Option<&TestContext> {
        self.stack.last()
    }

    // ------------------------------------------------------------------------
    // Test scopes
    // ------------------------------------------------------------------------

    /// Runs `body` as one test.
    ///
    /// A failing assertion inside `body` (or inside any function it calls)
    /// abandons the rest of `body` and returns [`TestOutcome::Failed`].
    /// Tests nest: an abort only ever reaches the innermost test.
    #[track_caller]
    pub fn test<F>(&mut self, name: &str, body: F) -> TestOutcome
    where
        F: FnOnce(&mut Runner),
    {
        self.run_scope(name, false, Location::caller(), body)
    }

    /// Runs `body` as a test that is expected to fail.
    ///
    /// Failing assertions count as successes and return normally; a passing
    /// assertion aborts the test and records it as failed. This exists to
    /// exercise the harness's own failure path.
    #[track_caller]
    pub fn inverted_test<F>(&mut self, name: &str, body: F) -> TestOutcome
    where
        F: FnOnce(&mut Runner),
    {
        self.run_scope(name, true, Location::caller(), body)
    }

    fn run_scope<F>(
        &mut self,
        name: &str,
        inverted: bool,
        location: &'static Location<'static>,
        body: F,
    ) -> TestOutcome
    where
        F: FnOnce(&mut Runner),
    {
        let depth = if inverted {
            self.enter_inverted_test(name, location)
        } else {
            self.enter_test(name, location)
        };
        self.advance_top(depth, TestState::BodyRunning);

        let result = panic::catch_unwind(AssertUnwindSafe(|| body(&mut *self)));
        match result {
            Ok(()) => self.on_normal_completion(depth),
            Err(payload) if self.terminating => panic::resume_unwind(payload),
            Err(payload) => match payload.downcast::<Abort>() {
                Ok(abort) if abort.depth == depth => self.on_abort(depth),
                Ok(abort) => self.fatal(HarnessError::StackMismatch {
                    expected: depth,
                    found: abort.depth,
                }),
                Err(payload) => self.on_panic(depth, payload),
            },
        }
    }

    /// Pushes a new test context and returns its depth, the handle aborts are addressed to.
    pub(crate) fn enter_test(&mut self, name: &str, location: &'static Location<'static>) -> usize {
        self.push_test(name, false, location)
    }

    pub(crate) fn enter_inverted_test(
        &mut self,
        name: &str,
        location: &'static Location<'static>,
    ) -> usize {
        self.push_test(name, true, location)
    }

    fn push_test(
        &mut self,
        name: &str,
        inverted: bool,
        location: &'static Location<'static>,
    ) -> usize {
        let context = TestContext::new(name, inverted, location);
        if let Some(pending) = &self.pending {
            let err = HarnessError::UnresolvedAssertion {
                pending: pending.to_string(),
                starting: format!(
                    "test {} at {}:{}",
                    context.name(),
                    location.file(),
                    location.line()
                ),
            };
            self.fatal(err);
        }

        self.metrics.tests_run += 1;
        self.trace(
            TRACE_TESTS,
            &format!(
                "{}. starting {}test {} at {}:{} {{",
                self.metrics.tests_run,
                if inverted { "inverted " } else { "" },
                context.name(),
                location.file(),
                location.line()
            ),
        );
        self.stack.push(context);
        self.stack.len()
    }

    /// Called when control reaches the test at `depth` through an abort.
    pub(crate) fn on_abort(&mut self, depth: usize) -> TestOutcome {
        self.leave_test(depth, TestState::Aborted, "abort")
    }

    /// Called when the body of the test at `depth` returned normally.
    pub(crate) fn on_normal_completion(&mut self, depth: usize) -> TestOutcome {
        self.leave_test(depth, TestState::Completed, "completion")
    }

    /// A panic that is not an abort is a crash inside the test: it fails the
    /// test whatever its inversion, and the run continues with the next one.
    fn on_panic(&mut self, depth: usize, payload: Box<dyn Any + Send>) -> TestOutcome {
        self.pending = None;
        if let Some(test) = self.stack.last() {
            let location = test.location();
            let line = format!(
                "{}:{}: In test {}, panicked: {}",
                location.file(),
                location.line(),
                test.name(),
                panic_message(payload.as_ref())
            );
            self.err.emit(Tone::Failure, &line);
        }
        self.leave_test(depth, TestState::Aborted, "abort")
    }

    fn leave_test(&mut self, depth: usize, state: TestState, action: &'static str) -> TestOutcome {
        if self.stack.is_empty() {
            self.fatal(HarnessError::NoActiveTest { action });
        }
        if self.stack.len() != depth {
            let found = self.stack.len();
            self.fatal(HarnessError::StackMismatch {
                expected: depth,
                found,
            });
        }
        self.advance_top(depth, state);

        let outcome = if state == TestState::Completed {
            self.metrics.test_successes += 1;
            TestOutcome::Passed
        } else {
            self.metrics.test_failures += 1;
            TestOutcome::Failed
        };
        self.stack.pop();
        self.trace(TRACE_TESTS, "}");
        outcome
    }

    fn advance_top(&mut self, depth: usize, next: TestState) {
        if self.stack.is_empty() {
            self.fatal(HarnessError::NoActiveTest { action: "start" });
        }
        let advanced = self.stack.last_mut().map_or(false, |test| test.advance(next));
        if !advanced {
            self.fatal(HarnessError::StackMismatch {
                expected: depth,
                found: self.stack.len(),
            });
        }
    }

    // ------------------------------------------------------------------------
    // Assertions
    // ------------------------------------------------------------------------

    /// Starts checking an assertion. Its result must be reported with
    /// [`Runner::succeeded`] or [`Runner::failed`] before anything else is
    /// started.
    pub fn prepare(&mut self, site: Site, expr: &str) {
        if let Some(pending) = &self.pending {
            let err = HarnessError::UnresolvedAssertion {
                pending: pending.to_string(),
                starting: format!("assertion {} at {}", expr, site),
            };
            self.fatal(err);
        }
        if !self.stack.is_empty() {
            self.metrics.assertions_run += 1;
            self.trace(
                TRACE_ASSERTIONS,
                &format!(
                    "{}. checking {} at {}:{} in {}()",
                    self.metrics.assertions_run, expr, site.file, site.line, site.function
                ),
            );
        }
        self.pending = Some(AssertionContext::new(site, expr));
    }

    /// Reports that the prepared assertion held.
    ///
    /// Inside an inverted test this is the unexpected outcome, and the test aborts.
    pub fn succeeded(&mut self) {
        let assertion = self.take_pending("success");
        let Some(test) = self.stack.last() else {
            return;
        };
        if test.is_inverted() {
            self.metrics.assertion_failures += 1;
            let message = format!("{} was expected to fail but held", assertion.expr);
            self.report_failure(&assertion, &message);
            self.unwind();
        }
        self.metrics.assertion_successes += 1;
    }

    /// Reports that the prepared assertion did not hold.
    ///
    /// Aborts the innermost test, or terminates the process with status 1
    /// when no test is running. Inside an inverted test the failure was
    /// expected and this returns normally.
    pub fn failed(&mut self, message: &str) {
        let assertion = self.take_pending("failure");
        let inverted = self.stack.last().map(TestContext::is_inverted);
        match inverted {
            None => {
                self.report_failure(&assertion, message);
                self.fatal(HarnessError::UnwrappedAssertion {
                    site: assertion.site.to_string(),
                });
            }
            Some(true) => {
                if self.prefs.show_failures {
                    self.report_failure(&assertion, message);
                }
                self.metrics.assertion_successes += 1;
            }
            Some(false) => {
                self.report_failure(&assertion, message);
                self.metrics.assertion_failures += 1;
                self.unwind();
            }
        }
    }

    /// Checks one condition: prepares it, then reports its result.
    ///
    /// `message` is only built when the condition fails.
    pub fn resolve_assertion<M>(&mut self, site: Site, expr: &str, condition: bool, message: M)
    where
        M: FnOnce() -> String,
    {
        self.prepare(site, expr);
        if condition {
            self.succeeded();
        } else {
            let message = message();
            self.failed(&message);
        }
    }

    fn take_pending(&mut self, outcome: &'static str) -> AssertionContext {
        match self.pending.take() {
            Some(assertion) => assertion,
            None => self.fatal(HarnessError::AssertionNotPrepared { outcome }),
        }
    }

    fn unwind(&self) -> ! {
        panic::resume_unwind(Box::new(Abort {
            depth: self.stack.len(),
        }))
    }

    // ------------------------------------------------------------------------
    // Reporting
    // ------------------------------------------------------------------------

    fn report_failure(&mut self, assertion: &AssertionContext, message: &str) {
        let site = &assertion.site;
        let line = format!(
            "{}:{}: In {}, assert {}",
            site.file, site.line, site.function, message
        );
        self.err.emit(Tone::Failure, &line);
    }

    fn trace(&mut self, level: u8, text: &str) {
        if !self.prefs.traces(level) {
            return;
        }
        let indent = "  ".repeat(self.stack.len());
        self.err.emit(Tone::Trace, &format!("{}{}", indent, text));
    }

    /// Prints the summary line for the run so far.
    pub fn print_results(&mut self) {
        let tone = if self.metrics.has_failures() {
            Tone::Failure
        } else {
            Tone::Success
        };
        let summary = self.metrics.summary();
        self.out.emit(tone, &summary);
    }

    /// The status a run with these results exits with.
    pub fn exit_code(&self) -> i32 {
        self.metrics.exit_code()
    }

    /// Prints the summary and terminates with [`Runner::exit_code`].
    pub fn exit(mut self) -> ! {
        self.print_results();
        (self.terminate)(self.exit_code())
    }

    fn fatal(&mut self, err: HarnessError) -> ! {
        self.terminating = true;
        let code = err.exit_code();
        self.err.emit(Tone::Failure, &err.render());
        (self.terminate)(code)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}
