//! The harness's own test suite.
//!
//! Each family of checks is exercised both ways: passing checks in a normal
//! test, and checks that must fail inside an inverted test. An inverted test
//! passes only if every check in it fails, so a check that wrongly passes
//! shows up as a failed test. Host applications can add
//! [`run_selftests`] to their own suites.

use std::cell::Cell;

use crate::harness::{Runner, TestOutcome};
use crate::{
    check, check_eq, check_float_eq, check_float_ge, check_float_gt, check_float_le,
    check_float_lt, check_float_ne, check_ge, check_gt, check_hex_eq, check_hex_ge,
    check_hex_gt, check_hex_le, check_hex_lt, check_hex_ne, check_hex_negative,
    check_hex_nonnegative, check_hex_nonpositive, check_hex_nonzero, check_hex_positive,
    check_hex_zero, check_le, check_lt, check_ne, check_negative, check_nonnegative,
    check_nonpositive, check_nonzero, check_not_null, check_null, check_positive, check_ptr_eq,
    check_ptr_ge, check_ptr_gt, check_ptr_le, check_ptr_lt, check_ptr_ne, check_str_empty,
    check_str_eq, check_str_ge, check_str_gt, check_str_le, check_str_lt, check_str_ne,
    check_str_nonempty, check_zero, fail,
};

pub fn run_selftests(t: &mut Runner) {
    int_suite(t);
    hex_suite(t);
    ptr_suite(t);
    float_suite(t);
    str_suite(t);
    evaluation_suite(t);
    nesting_suite(t);
}

fn int_suite(t: &mut Runner) {
    let (a, b, c, z, n) = (4, 3, 4, 0, -1);

    t.test("integer comparisons", |t| {
        check_eq!(t, a, c);
        check_ne!(t, a, b);
        check_gt!(t, a, b);
        check_ge!(t, a, b);
        check_ge!(t, a, c);
        check_lt!(t, b, a);
        check_le!(t, b, a);
        check_le!(t, c, a);

        check_zero!(t, z);
        check_nonzero!(t, a);
        check_positive!(t, a);
        check_nonpositive!(t, n);
        check_nonpositive!(t, z);
        check_negative!(t, n);
        check_nonnegative!(t, a);
        check_nonnegative!(t, z);
    });

    t.inverted_test("integer comparisons that fail", |t| {
        check_eq!(t, a, b);
        check_ne!(t, a, c);
        check_gt!(t, a, c);
        check_gt!(t, b, c);
        check_ge!(t, b, a);
        check_lt!(t, c, a);
        check_lt!(t, c, b);
        check_le!(t, a, b);

        check_zero!(t, a);
        check_nonzero!(t, z);
        check_positive!(t, z);
        check_positive!(t, n);
        check_nonpositive!(t, a);
        check_negative!(t, z);
        check_negative!(t, a);
        check_nonnegative!(t, n);
    });
}

fn hex_suite(t: &mut Runner) {
    let (a, b, c, z, n) = (4, 3, 4, 0, -1);

    t.test("hex comparisons", |t| {
        check_hex_eq!(t, a, c);
        check_hex_ne!(t, a, b);
        check_hex_gt!(t, a, b);
        check_hex_ge!(t, a, b);
        check_hex_ge!(t, a, c);
        check_hex_lt!(t, b, a);
        check_hex_le!(t, b, a);
        check_hex_le!(t, c, a);

        check_hex_zero!(t, z);
        check_hex_nonzero!(t, a);
        check_hex_positive!(t, a);
        check_hex_nonpositive!(t, n);
        check_hex_nonpositive!(t, z);
        check_hex_negative!(t, n);
        check_hex_nonnegative!(t, a);
        check_hex_nonnegative!(t, z);
    });

    t.inverted_test("hex comparisons that fail", |t| {
        check_hex_eq!(t, a, b);
        check_hex_ne!(t, a, c);
        check_hex_gt!(t, a, c);
        check_hex_gt!(t, b, c);
        check_hex_ge!(t, b, a);
        check_hex_lt!(t, c, a);
        check_hex_lt!(t, c, b);
        check_hex_le!(t, a, b);

        check_hex_zero!(t, a);
        check_hex_nonzero!(t, z);
        check_hex_positive!(t, z);
        check_hex_positive!(t, n);
        check_hex_nonpositive!(t, a);
        check_hex_negative!(t, z);
        check_hex_negative!(t, a);
        check_hex_nonnegative!(t, n);
    });
}

fn ptr_suite(t: &mut Runner) {
    // Elements of one array, so their order is known.
    let cells = [0i32; 2];
    let bp: *const i32 = &cells[0];
    let ap: *const i32 = &cells[1];
    let cp: *const i32 = &cells[1];
    let n: *const i32 = std::ptr::null();

    t.test("pointer comparisons", |t| {
        check_not_null!(t, ap);
        check_null!(t, n);

        check_ptr_eq!(t, ap, cp);
        check_ptr_ne!(t, ap, bp);
        check_ptr_gt!(t, ap, bp);
        check_ptr_ge!(t, ap, bp);
        check_ptr_ge!(t, ap, cp);
        check_ptr_lt!(t, bp, ap);
        check_ptr_le!(t, bp, ap);
        check_ptr_le!(t, cp, ap);
    });

    t.inverted_test("pointer comparisons that fail", |t| {
        check_not_null!(t, n);
        check_null!(t, ap);

        check_ptr_eq!(t, ap, bp);
        check_ptr_ne!(t, ap, cp);
        check_ptr_gt!(t, ap, cp);
        check_ptr_gt!(t, bp, cp);
        check_ptr_ge!(t, bp, ap);
        check_ptr_lt!(t, cp, ap);
        check_ptr_lt!(t, cp, bp);
        check_ptr_le!(t, ap, bp);
    });
}

fn float_suite(t: &mut Runner) {
    let (a, b, c) = (0.0004f32, 0.0003f32, 0.0004f32);

    t.test("float comparisons", |t| {
        check_float_eq!(t, a, c);
        check_float_ne!(t, a, b);
        check_float_gt!(t, a, b);
        check_float_ge!(t, a, b);
        check_float_ge!(t, a, c);
        check_float_lt!(t, b, a);
        check_float_le!(t, b, a);
        check_float_le!(t, c, a);
    });

    t.inverted_test("float comparisons that fail", |t| {
        check_float_eq!(t, a, b);
        check_float_ne!(t, a, c);
        check_float_gt!(t, a, c);
        check_float_gt!(t, b, c);
        check_float_ge!(t, b, a);
        check_float_lt!(t, c, a);
        check_float_lt!(t, c, b);
        check_float_le!(t, a, b);
    });
}

fn str_suite(t: &mut Runner) {
    let a = "Bogozity";
    let b = "Arclamp";
    let c = String::from("Bogozity");
    let e = "";
    let n: Option<&str> = None;

    t.test("string comparisons", |t| {
        check_str_eq!(t, a, c);
        check_str_ne!(t, a, b);
        check_str_gt!(t, a, b);
        check_str_ge!(t, a, b);
        check_str_ge!(t, a, c);
        check_str_lt!(t, b, a);
        check_str_le!(t, b, a);
        check_str_le!(t, c, a);

        check_str_empty!(t, e);
        check_str_nonempty!(t, a);
        check_str_nonempty!(t, Some(c.as_str()));
    });

    t.inverted_test("string comparisons that fail", |t| {
        check_str_eq!(t, a, b);
        check_str_ne!(t, a, c);
        check_str_gt!(t, a, c);
        check_str_gt!(t, b, c);
        check_str_ge!(t, b, a);
        check_str_lt!(t, c, a);
        check_str_lt!(t, c, b);
        check_str_le!(t, a, b);

        check_str_empty!(t, a);
        check_str_empty!(t, n);
        check_str_nonempty!(t, e);
        check_str_nonempty!(t, n);
    });
}

fn evaluation_suite(t: &mut Runner) {
    t.test("operands are evaluated once", |t| {
        let calls = Cell::new(0);
        let next = || {
            calls.set(calls.get() + 1);
            calls.get()
        };
        check_eq!(t, next(), 1);
        check_eq!(t, calls.get(), 1);
        check_positive!(t, next());
        check_eq!(t, calls.get(), 2);
    });

    t.test("passing checks count once", |t| {
        let before = t.metrics().assertion_successes;
        check!(t, before < usize::MAX);
        check_eq!(t, t.metrics().assertion_successes, before + 1);
    });

    t.test("operands may run checks of their own", |t| {
        check_eq!(t, nested(t), nested(t));
    });
}

fn nested(t: &mut Runner) -> i32 {
    check_eq!(t, 2, 2);
    2
}

fn nesting_suite(t: &mut Runner) {
    t.test("an inner failure stays inside the inner test", |t| {
        let failures = t.metrics().test_failures;
        let inner = t.inverted_test("inner", |t| {
            fail!(t, "expected failure in {}", "inner");
            check_eq!(t, 4, 3);
        });
        check!(t, inner.passed());
        check_eq!(t, t.metrics().test_failures, failures);
        check_eq!(t, t.depth(), 1);
    });

    t.test("", |t| {
        let name = t.current_test().map(|test| test.name().to_owned());
        check!(t, name.as_deref() == Some("(unnamed)"));
    });

    t.test("tests nest to any depth", |t| {
        let outcome = t.test("level 2", |t| {
            t.test("level 3", |t| {
                check_eq!(t, t.depth(), 3);
            });
        });
        check!(t, outcome == TestOutcome::Passed);
    });
}
