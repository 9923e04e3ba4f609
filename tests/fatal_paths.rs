//! Misuse of the harness ends the run with a diagnostic and a fixed status.

mod common;

use common::{exit_status, quiet};
use mutest::diagnostics::{
    EXIT_ASSERTION_NOT_PREPARED, EXIT_UNRESOLVED_ASSERTION, EXIT_UNWRAPPED_ASSERTION,
};
use mutest::{check, check_eq, here};

#[test]
fn passing_assertion_outside_a_test_is_a_no_op() {
    let mut c = quiet();
    let status = exit_status(|| check_eq!(c.runner, 1, 1));
    assert_eq!(status, None);
    assert_eq!(c.runner.metrics(), &mutest::Metrics::default());
    assert_eq!(c.err.contents(), "");
}

#[test]
fn failing_assertion_outside_a_test_exits_with_one() {
    let mut c = quiet();
    let status = exit_status(|| check!(c.runner, 2 + 2 == 5));
    assert_eq!(status, Some(EXIT_UNWRAPPED_ASSERTION));
    let err = c.err.contents();
    assert!(err.contains("assert 2 + 2 == 5"));
    assert!(err.contains("mutest::unwrapped_assertion"));
}

#[test]
fn starting_a_test_with_an_assertion_in_flight_is_fatal() {
    let mut c = quiet();
    c.runner.prepare(here!(), "left open");
    let status = exit_status(|| {
        c.runner.test("next", |_| {});
    });
    assert_eq!(status, Some(EXIT_UNRESOLVED_ASSERTION));
    assert!(c.err.contents().contains("unable to start test next"));
}

#[test]
fn nested_test_with_an_assertion_in_flight_ends_the_run() {
    let mut c = quiet();
    let status = exit_status(|| {
        c.runner.test("outer", |t| {
            t.prepare(here!(), "left open");
            t.test("inner", |_| {});
        });
    });
    assert_eq!(status, Some(EXIT_UNRESOLVED_ASSERTION));
    let err = c.err.contents();
    assert!(err.contains("mutest::unresolved_assertion"));
    assert!(!err.contains("panicked"));
    assert_eq!(c.runner.metrics().test_failures, 0);
    assert_eq!(c.runner.depth(), 1);
}

#[test]
fn unprepared_report_in_a_nested_test_ends_the_run() {
    let mut c = quiet();
    let mut after = false;
    let status = exit_status(|| {
        c.runner.test("outer", |t| {
            t.test("inner", |t| t.failed("nothing prepared"));
            after = true;
        });
    });
    assert_eq!(status, Some(EXIT_ASSERTION_NOT_PREPARED));
    assert!(!after);
}

#[test]
fn preparing_twice_is_fatal() {
    let mut c = quiet();
    c.runner.prepare(here!(), "first");
    let status = exit_status(|| c.runner.prepare(here!(), "second"));
    assert_eq!(status, Some(EXIT_UNRESOLVED_ASSERTION));
}

#[test]
fn reporting_without_preparing_is_fatal() {
    let mut c = quiet();
    let status = exit_status(|| c.runner.failed("nothing prepared"));
    assert_eq!(status, Some(EXIT_ASSERTION_NOT_PREPARED));
}

#[test]
fn exit_prints_the_summary_and_reports_failures() {
    let mut c = quiet();
    c.runner.test("one", |t| check!(t, false));
    c.runner.test("two", |t| check!(t, true));
    let out = c.out.clone();
    let status = exit_status(move || c.runner.exit());
    assert_eq!(status, Some(1));
    assert_eq!(out.contents(), "ERROR: 1 failure in 2 tests run!\n");
}
