mod common;

use std::cell::Cell;

use common::{captured, quiet};
use mutest::cli::output::NullSink;
use mutest::config::TRACE_TESTS;
use mutest::harness::TestOutcome;
use mutest::{check, check_eq, check_str_empty, Preferences, Runner};

#[test]
fn passing_assertion_counts_once() {
    let mut c = quiet();
    c.runner.test("counts", |t| {
        check_eq!(t, 4, 4);
    });
    let metrics = c.runner.metrics();
    assert_eq!(metrics.assertions_run, 1);
    assert_eq!(metrics.assertion_successes, 1);
    assert_eq!(metrics.assertion_failures, 0);
    assert_eq!(metrics.test_successes, 1);
}

#[test]
fn operands_are_evaluated_exactly_once() {
    let mut c = quiet();
    let calls = Cell::new(0);
    let bump = || {
        calls.set(calls.get() + 1);
        calls.get()
    };
    c.runner.test("once", |t| {
        check_eq!(t, bump(), bump());
    });
    assert_eq!(calls.get(), 2);
    assert_eq!(c.runner.metrics().test_failures, 1);
}

#[test]
fn failed_assertion_skips_rest_of_body() {
    let mut c = quiet();
    let mut after = false;
    let outcome = c.runner.test("stops", |t| {
        check_eq!(t, 4, 3);
        after = true;
    });
    assert_eq!(outcome, TestOutcome::Failed);
    assert!(!after);
    assert_eq!(c.runner.metrics().test_failures, 1);
    assert!(c.err.contents().contains("assert 4 == 3 with 4=4 and 3=3"));
}

#[test]
fn inner_failure_does_not_fail_outer_test() {
    let mut c = quiet();
    let mut reached = false;
    let outer = c.runner.test("A", |t| {
        let inner = t.test("B", |t| check_eq!(t, 1, 2));
        assert_eq!(inner, TestOutcome::Failed);
        reached = true;
        check!(t, true);
    });
    assert_eq!(outer, TestOutcome::Passed);
    assert!(reached);
    let metrics = c.runner.metrics();
    assert_eq!(metrics.tests_run, 2);
    assert_eq!(metrics.test_successes, 1);
    assert_eq!(metrics.test_failures, 1);
    assert_eq!(c.runner.depth(), 0);
}

#[test]
fn inversion_flips_the_test_outcome() {
    for condition in [true, false] {
        let mut plain = quiet();
        let normal = plain.runner.test("plain", |t| check!(t, condition));

        let mut flipped = quiet();
        let inverted = flipped.runner.inverted_test("flipped", |t| check!(t, condition));

        assert_ne!(normal, inverted, "condition {}", condition);
    }
}

#[test]
fn expected_failures_are_hidden_unless_requested() {
    let mut c = quiet();
    c.runner.inverted_test("quiet", |t| check_eq!(t, 4, 3));
    assert_eq!(c.err.contents(), "");

    let mut c = captured(Preferences {
        show_failures: true,
        ..Preferences::default()
    });
    c.runner.inverted_test("loud", |t| check_eq!(t, 4, 3));
    assert!(c.err.contents().contains("assert 4 == 3"));
    assert!(c.runner.metrics().test_failures == 0);
}

#[test]
fn unexpected_success_in_inverted_test_is_reported() {
    let mut c = quiet();
    let outcome = c.runner.inverted_test("holds", |t| check_eq!(t, 4, 4));
    assert_eq!(outcome, TestOutcome::Failed);
    assert!(c.err.contents().contains("4 == 4 was expected to fail"));
}

#[test]
fn string_emptiness() {
    let mut c = quiet();
    assert!(c.runner.test("empty", |t| check_str_empty!(t, "")).passed());

    let x = "x";
    assert!(!c.runner.test("x", |t| check_str_empty!(t, x)).passed());
    assert!(c.err.contents().contains("x is empty with x set to \"x\""));

    let absent: Option<String> = None;
    assert!(!c.runner.test("absent", |t| check_str_empty!(t, absent)).passed());
    assert!(c.err.contents().contains("absent is empty with absent set to None"));
}

#[test]
fn failure_line_names_file_line_and_function() {
    let mut c = quiet();
    c.runner.test("where", |t| check!(t, 1 > 2));
    let err = c.err.contents();
    assert!(err.starts_with("tests/runner_tests.rs:"), "{}", err);
    assert!(err.contains(": In failure_line_names_file_line_and_function, assert 1 > 2"));
}

#[test]
fn test_traces_bracket_the_body() {
    let mut c = captured(Preferences {
        verbosity: TRACE_TESTS,
        ..Preferences::default()
    });
    c.runner.inverted_test("traced", |_| {});
    let err = c.err.contents();
    let lines: Vec<&str> = err.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("1. starting inverted test traced at tests/runner_tests.rs:"));
    assert!(lines[0].ends_with(" {"));
    assert_eq!(lines[1], "}");
}

#[test]
fn zero_tests_report_all_ok() {
    let mut c = quiet();
    c.runner.print_results();
    assert_eq!(
        c.out.contents(),
        "All OK.  0 tests run, 0 successes (0 assertions).\n"
    );
    assert_eq!(c.runner.exit_code(), 0);
}

#[test]
fn exit_code_caps_at_one_hundred() {
    let mut c = quiet();
    for _ in 0..150 {
        c.runner.test("fails", |t| check!(t, false));
    }
    assert_eq!(c.runner.metrics().test_failures, 150);
    assert_eq!(c.runner.exit_code(), 100);
}

#[test]
fn selftests_pass() {
    let mut c = quiet();
    mutest::selftest::run_selftests(&mut c.runner);
    assert_eq!(c.runner.metrics().test_failures, 0, "{}", c.err.contents());
    assert!(c.runner.metrics().tests_run > 10);
}

#[test]
fn silent_runner_still_keeps_score() {
    let mut runner = Runner::with_sinks(
        Preferences {
            verbosity: 2,
            show_failures: true,
            ..Preferences::default()
        },
        Box::new(NullSink),
        Box::new(NullSink),
    );
    runner.test("passes", |t| check_eq!(t, 2, 2));
    runner.test("fails", |t| check_eq!(t, 2, 3));
    runner.print_results();
    let metrics = runner.metrics();
    assert_eq!(metrics.tests_run, 2);
    assert_eq!(metrics.test_failures, 1);
    assert_eq!(metrics.assertion_failures, 1);
    assert_eq!(runner.exit_code(), 1);
}

#[test]
fn show_failures_can_be_switched_on_mid_run() {
    let mut c = quiet();
    c.runner.inverted_test("hidden", |t| check_eq!(t, 1, 2));
    assert_eq!(c.err.contents(), "");
    c.runner.set_show_failures(true);
    c.runner.inverted_test("shown", |t| check_eq!(t, 1, 2));
    assert!(c.err.contents().contains("assert 1 == 2 with 1=1 and 2=2"));
}
