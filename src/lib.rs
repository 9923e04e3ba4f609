pub use crate::assert::{CmpOp, MaybeStr, Operand, Pointer};
pub use crate::config::{ColorMode, Preferences};
pub use crate::diagnostics::HarnessError;
pub use crate::harness::{Metrics, Runner, Site, TestOutcome};

pub mod assert;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod harness;
pub mod render;
pub mod selftest;

mod macros;
