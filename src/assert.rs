//! Typed checks built on the runner's assertion protocol.
//!
//! The `check_*` macros bind their operands once, then call one of the
//! methods here with the operand values and their source text. Each method
//! builds the expression text, decides the outcome, and only formats the
//! failure message when the check fails.

use std::fmt;
use std::ptr::NonNull;

use crate::harness::{Runner, Site};
use crate::render;

/// A comparison between two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl CmpOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
        }
    }

    /// Word form, used for string comparisons.
    pub fn mnemonic(self) -> &'static str {
        match self {
            CmpOp::Eq => "eq",
            CmpOp::Ne => "ne",
            CmpOp::Gt => "gt",
            CmpOp::Ge => "ge",
            CmpOp::Lt => "lt",
            CmpOp::Le => "le",
        }
    }

    /// Unordered values (NaN) satisfy only `Ne`.
    pub fn holds<T: PartialOrd + ?Sized>(self, lhs: &T, rhs: &T) -> bool {
        match self {
            CmpOp::Eq => lhs == rhs,
            CmpOp::Ne => lhs != rhs,
            CmpOp::Gt => lhs > rhs,
            CmpOp::Ge => lhs >= rhs,
            CmpOp::Lt => lhs < rhs,
            CmpOp::Le => lhs <= rhs,
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An evaluated operand together with the source text it came from.
#[derive(Debug)]
pub struct Operand<'a, T: ?Sized> {
    pub expr: &'static str,
    pub value: &'a T,
}

impl<'a, T: ?Sized> Operand<'a, T> {
    pub fn new(expr: &'static str, value: &'a T) -> Self {
        Self { expr, value }
    }
}

/// Anything that designates a memory address, for the pointer checks.
pub trait Pointer {
    fn address(&self) -> usize;
}

impl<T: ?Sized> Pointer for *const T {
    fn address(&self) -> usize {
        *self as *const () as usize
    }
}

impl<T: ?Sized> Pointer for *mut T {
    fn address(&self) -> usize {
        *self as *const () as usize
    }
}

impl<T: ?Sized> Pointer for &T {
    fn address(&self) -> usize {
        *self as *const T as *const () as usize
    }
}

impl<T: ?Sized> Pointer for &mut T {
    fn address(&self) -> usize {
        &**self as *const T as *const () as usize
    }
}

impl<T: ?Sized> Pointer for Option<&T> {
    fn address(&self) -> usize {
        self.map_or(0, |value| value.address())
    }
}

impl<T: ?Sized> Pointer for NonNull<T> {
    fn address(&self) -> usize {
        self.as_ptr() as *const () as usize
    }
}

/// A string that may be absent, for the emptiness checks.
pub trait MaybeStr {
    fn maybe_str(&self) -> Option<&str>;
}

impl MaybeStr for str {
    fn maybe_str(&self) -> Option<&str> {
        Some(self)
    }
}

impl MaybeStr for String {
    fn maybe_str(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: MaybeStr + ?Sized> MaybeStr for &T {
    fn maybe_str(&self) -> Option<&str> {
        (**self).maybe_str()
    }
}

impl<T: MaybeStr> MaybeStr for Option<T> {
    fn maybe_str(&self) -> Option<&str> {
        self.as_ref().and_then(MaybeStr::maybe_str)
    }
}

impl Runner {
    /// Checks `lhs op rhs`, rendering both values on failure.
    pub fn compare<T, R>(&mut self, site: Site, op: CmpOp, lhs: Operand<'_, T>, rhs: Operand<'_, T>, render: R)
    where
        T: PartialOrd + ?Sized,
        R: Fn(&T) -> String,
    {
        let expr = format!("{} {} {}", lhs.expr, op, rhs.expr);
        let holds = op.holds(lhs.value, rhs.value);
        self.resolve_assertion(site, &expr, holds, || {
            format!(
                "{} with {}={} and {}={}",
                expr,
                lhs.expr,
                render(lhs.value),
                rhs.expr,
                render(rhs.value)
            )
        });
    }

    /// Checks `value op 0`, where zero is the type's default.
    pub fn compare_to_zero<T, R>(&mut self, site: Site, op: CmpOp, value: Operand<'_, T>, render: R)
    where
        T: PartialOrd + Default,
        R: Fn(&T) -> String,
    {
        let expr = format!("{} {} 0", value.expr, op);
        let holds = op.holds(value.value, &T::default());
        self.resolve_assertion(site, &expr, holds, || {
            format!("{} with {}={}", expr, value.expr, render(value.value))
        });
    }

    /// Byte-wise string comparison.
    pub fn compare_str(&mut self, site: Site, op: CmpOp, lhs: Operand<'_, str>, rhs: Operand<'_, str>) {
        let expr = format!("{} {} {}", lhs.expr, op.mnemonic(), rhs.expr);
        let holds = op.holds(lhs.value.as_bytes(), rhs.value.as_bytes());
        self.resolve_assertion(site, &expr, holds, || {
            format!(
                "{} with {}={} and {}={}",
                expr,
                lhs.expr,
                render::quoted(lhs.value),
                rhs.expr,
                render::quoted(rhs.value)
            )
        });
    }

    /// Passes for a present, empty string.
    pub fn check_str_empty(&mut self, site: Site, expr: &'static str, value: Option<&str>) {
        let text = format!("{} is empty", expr);
        let holds = value.map_or(false, str::is_empty);
        self.resolve_assertion(site, &text, holds, || described(&text, expr, value));
    }

    /// Passes for a present, non-empty string.
    pub fn check_str_nonempty(&mut self, site: Site, expr: &'static str, value: Option<&str>) {
        let text = format!("{} is not empty", expr);
        let holds = value.map_or(false, |s| !s.is_empty());
        self.resolve_assertion(site, &text, holds, || described(&text, expr, value));
    }

    pub fn check_not_null(&mut self, site: Site, expr: &'static str, address: usize) {
        self.check_address(site, expr, address, CmpOp::Ne);
    }

    pub fn check_null(&mut self, site: Site, expr: &'static str, address: usize) {
        self.check_address(site, expr, address, CmpOp::Eq);
    }

    fn check_address(&mut self, site: Site, expr: &'static str, address: usize, op: CmpOp) {
        let text = format!("{} {} NULL", expr, op);
        let holds = op.holds(&address, &0);
        self.resolve_assertion(site, &text, holds, || {
            format!("{} with {}={}", text, expr, render::pointer(&address))
        });
    }
}

fn described(text: &str, expr: &str, value: Option<&str>) -> String {
    match value {
        Some(s) => format!("{} with {} set to {}", text, expr, render::quoted(s)),
        None => format!("{} with {} set to None", text, expr),
    }
}
