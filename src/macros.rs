//! Assertion macros.
//!
//! Every macro takes the runner as its first argument and records the file,
//! line, and enclosing function of the call. Operands are evaluated exactly
//! once, before anything is compared or formatted.

/// The [`Site`](crate::Site) of the macro call.
#[macro_export]
macro_rules! here {
    () => {{
        fn f() {}
        $crate::harness::Site::new(
            file!(),
            line!(),
            $crate::harness::enclosing_function($crate::harness::type_name_of(f)),
        )
    }};
}

/// Checks a boolean condition. The failure message is the condition's text.
#[macro_export]
macro_rules! check {
    ($t:expr, $cond:expr $(,)?) => {{
        let condition: bool = $cond;
        $t.resolve_assertion($crate::here!(), stringify!($cond), condition, || {
            stringify!($cond).to_string()
        })
    }};
}

/// Checks a boolean condition with a formatted failure message.
#[macro_export]
macro_rules! check_fmt {
    ($t:expr, $cond:expr, $($arg:tt)+) => {{
        let condition: bool = $cond;
        $t.resolve_assertion($crate::here!(), stringify!($cond), condition, || {
            format!($($arg)+)
        })
    }};
}

/// Fails unconditionally with a formatted message.
#[macro_export]
macro_rules! fail {
    ($t:expr, $($arg:tt)+) => {
        $t.resolve_assertion($crate::here!(), "fail", false, || format!($($arg)+))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __check_cmp {
    ($t:expr, $op:ident, $render:path, $x:expr, $y:expr) => {
        match ($x, $y) {
            (x, y) => $t.compare(
                $crate::here!(),
                $crate::CmpOp::$op,
                $crate::Operand::new(stringify!($x), &x),
                $crate::Operand::new(stringify!($y), &y),
                $render,
            ),
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __check_zero {
    ($t:expr, $op:ident, $render:path, $x:expr) => {
        match $x {
            x => $t.compare_to_zero(
                $crate::here!(),
                $crate::CmpOp::$op,
                $crate::Operand::new(stringify!($x), &x),
                $render,
            ),
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __check_ptr {
    ($t:expr, $op:ident, $x:expr, $y:expr) => {
        match (
            $crate::Pointer::address(&$x),
            $crate::Pointer::address(&$y),
        ) {
            (x, y) => $t.compare(
                $crate::here!(),
                $crate::CmpOp::$op,
                $crate::Operand::new(stringify!($x), &x),
                $crate::Operand::new(stringify!($y), &y),
                $crate::render::pointer,
            ),
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __check_float {
    ($t:expr, $op:ident, $x:expr, $y:expr) => {
        match (($x) as f64, ($y) as f64) {
            (x, y) => $t.compare(
                $crate::here!(),
                $crate::CmpOp::$op,
                $crate::Operand::new(stringify!($x), &x),
                $crate::Operand::new(stringify!($y), &y),
                $crate::render::float,
            ),
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __check_str {
    ($t:expr, $op:ident, $x:expr, $y:expr) => {
        match (&$x, &$y) {
            (x, y) => $t.compare_str(
                $crate::here!(),
                $crate::CmpOp::$op,
                $crate::Operand::new(stringify!($x), ::core::convert::AsRef::<str>::as_ref(x)),
                $crate::Operand::new(stringify!($y), ::core::convert::AsRef::<str>::as_ref(y)),
            ),
        }
    };
}

// Integer comparisons, rendered in decimal.

#[macro_export]
macro_rules! check_eq {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_cmp!($t, Eq, $crate::render::decimal, $x, $y)
    };
}

#[macro_export]
macro_rules! check_ne {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_cmp!($t, Ne, $crate::render::decimal, $x, $y)
    };
}

#[macro_export]
macro_rules! check_gt {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_cmp!($t, Gt, $crate::render::decimal, $x, $y)
    };
}

#[macro_export]
macro_rules! check_ge {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_cmp!($t, Ge, $crate::render::decimal, $x, $y)
    };
}

#[macro_export]
macro_rules! check_lt {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_cmp!($t, Lt, $crate::render::decimal, $x, $y)
    };
}

#[macro_export]
macro_rules! check_le {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_cmp!($t, Le, $crate::render::decimal, $x, $y)
    };
}

#[macro_export]
macro_rules! check_zero {
    ($t:expr, $x:expr $(,)?) => {
        $crate::__check_zero!($t, Eq, $crate::render::decimal, $x)
    };
}

#[macro_export]
macro_rules! check_nonzero {
    ($t:expr, $x:expr $(,)?) => {
        $crate::__check_zero!($t, Ne, $crate::render::decimal, $x)
    };
}

#[macro_export]
macro_rules! check_positive {
    ($t:expr, $x:expr $(,)?) => {
        $crate::__check_zero!($t, Gt, $crate::render::decimal, $x)
    };
}

#[macro_export]
macro_rules! check_negative {
    ($t:expr, $x:expr $(,)?) => {
        $crate::__check_zero!($t, Lt, $crate::render::decimal, $x)
    };
}

#[macro_export]
macro_rules! check_nonnegative {
    ($t:expr, $x:expr $(,)?) => {
        $crate::__check_zero!($t, Ge, $crate::render::decimal, $x)
    };
}

#[macro_export]
macro_rules! check_nonpositive {
    ($t:expr, $x:expr $(,)?) => {
        $crate::__check_zero!($t, Le, $crate::render::decimal, $x)
    };
}

// Same checks, rendered in hex.

#[macro_export]
macro_rules! check_hex_eq {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_cmp!($t, Eq, $crate::render::hex, $x, $y)
    };
}

#[macro_export]
macro_rules! check_hex_ne {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_cmp!($t, Ne, $crate::render::hex, $x, $y)
    };
}

#[macro_export]
macro_rules! check_hex_gt {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_cmp!($t, Gt, $crate::render::hex, $x, $y)
    };
}

#[macro_export]
macro_rules! check_hex_ge {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_cmp!($t, Ge, $crate::render::hex, $x, $y)
    };
}

#[macro_export]
macro_rules! check_hex_lt {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_cmp!($t, Lt, $crate::render::hex, $x, $y)
    };
}

#[macro_export]
macro_rules! check_hex_le {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_cmp!($t, Le, $crate::render::hex, $x, $y)
    };
}

#[macro_export]
macro_rules! check_hex_zero {
    ($t:expr, $x:expr $(,)?) => {
        $crate::__check_zero!($t, Eq, $crate::render::hex, $x)
    };
}

#[macro_export]
macro_rules! check_hex_nonzero {
    ($t:expr, $x:expr $(,)?) => {
        $crate::__check_zero!($t, Ne, $crate::render::hex, $x)
    };
}

#[macro_export]
macro_rules! check_hex_positive {
    ($t:expr, $x:expr $(,)?) => {
        $crate::__check_zero!($t, Gt, $crate::render::hex, $x)
    };
}

#[macro_export]
macro_rules! check_hex_negative {
    ($t:expr, $x:expr $(,)?) => {
        $crate::__check_zero!($t, Lt, $crate::render::hex, $x)
    };
}

#[macro_export]
macro_rules! check_hex_nonnegative {
    ($t:expr, $x:expr $(,)?) => {
        $crate::__check_zero!($t, Ge, $crate::render::hex, $x)
    };
}

#[macro_export]
macro_rules! check_hex_nonpositive {
    ($t:expr, $x:expr $(,)?) => {
        $crate::__check_zero!($t, Le, $crate::render::hex, $x)
    };
}

// Pointers. Operands may be raw pointers, references, `Option<&T>` or `NonNull`.

#[macro_export]
macro_rules! check_not_null {
    ($t:expr, $p:expr $(,)?) => {
        match $crate::Pointer::address(&$p) {
            address => $t.check_not_null($crate::here!(), stringify!($p), address),
        }
    };
}

#[macro_export]
macro_rules! check_null {
    ($t:expr, $p:expr $(,)?) => {
        match $crate::Pointer::address(&$p) {
            address => $t.check_null($crate::here!(), stringify!($p), address),
        }
    };
}

#[macro_export]
macro_rules! check_ptr_eq {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_ptr!($t, Eq, $x, $y)
    };
}

#[macro_export]
macro_rules! check_ptr_ne {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_ptr!($t, Ne, $x, $y)
    };
}

#[macro_export]
macro_rules! check_ptr_gt {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_ptr!($t, Gt, $x, $y)
    };
}

#[macro_export]
macro_rules! check_ptr_ge {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_ptr!($t, Ge, $x, $y)
    };
}

#[macro_export]
macro_rules! check_ptr_lt {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_ptr!($t, Lt, $x, $y)
    };
}

#[macro_export]
macro_rules! check_ptr_le {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_ptr!($t, Le, $x, $y)
    };
}

// Floats, compared as f64.

#[macro_export]
macro_rules! check_float_eq {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_float!($t, Eq, $x, $y)
    };
}

#[macro_export]
macro_rules! check_float_ne {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_float!($t, Ne, $x, $y)
    };
}

#[macro_export]
macro_rules! check_float_gt {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_float!($t, Gt, $x, $y)
    };
}

#[macro_export]
macro_rules! check_float_ge {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_float!($t, Ge, $x, $y)
    };
}

#[macro_export]
macro_rules! check_float_lt {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_float!($t, Lt, $x, $y)
    };
}

#[macro_export]
macro_rules! check_float_le {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_float!($t, Le, $x, $y)
    };
}

// Strings, compared byte-wise. Operands are anything `AsRef<str>`.

#[macro_export]
macro_rules! check_str_eq {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_str!($t, Eq, $x, $y)
    };
}

#[macro_export]
macro_rules! check_str_ne {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_str!($t, Ne, $x, $y)
    };
}

#[macro_export]
macro_rules! check_str_gt {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_str!($t, Gt, $x, $y)
    };
}

#[macro_export]
macro_rules! check_str_ge {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_str!($t, Ge, $x, $y)
    };
}

#[macro_export]
macro_rules! check_str_lt {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_str!($t, Lt, $x, $y)
    };
}

#[macro_export]
macro_rules! check_str_le {
    ($t:expr, $x:expr, $y:expr $(,)?) => {
        $crate::__check_str!($t, Le, $x, $y)
    };
}

/// Passes for an empty string. Accepts `&str`, `String`, or an `Option` of
/// either; `None` fails.
#[macro_export]
macro_rules! check_str_empty {
    ($t:expr, $s:expr $(,)?) => {
        match $crate::MaybeStr::maybe_str(&$s) {
            value => $t.check_str_empty($crate::here!(), stringify!($s), value),
        }
    };
}

/// Passes for a non-empty string; `None` fails.
#[macro_export]
macro_rules! check_str_nonempty {
    ($t:expr, $s:expr $(,)?) => {
        match $crate::MaybeStr::maybe_str(&$s) {
            value => $t.check_str_nonempty($crate::here!(), stringify!($s), value),
        }
    };
}
