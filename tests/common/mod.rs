//! Shared helpers for the integration tests: a runner wired to in-memory
//! sinks and an exit handler that unwinds instead of ending the process.

#![allow(dead_code)]

use std::panic::{self, AssertUnwindSafe};

use mutest::cli::output::SharedBuffer;
use mutest::{Preferences, Runner};

/// Payload carried by [`exit_by_unwind`].
#[derive(Debug)]
pub struct Exited(pub i32);

pub fn exit_by_unwind(code: i32) -> ! {
    panic::resume_unwind(Box::new(Exited(code)))
}

/// A runner with its captured stdout and stderr.
pub struct Captured {
    pub runner: Runner,
    pub out: SharedBuffer,
    pub err: SharedBuffer,
}

pub fn captured(prefs: Preferences) -> Captured {
    let out = SharedBuffer::new();
    let err = SharedBuffer::new();
    let runner = Runner::with_sinks(prefs, Box::new(out.clone()), Box::new(err.clone()))
        .with_exit_handler(exit_by_unwind);
    Captured { runner, out, err }
}

pub fn quiet() -> Captured {
    captured(Preferences::default())
}

/// Runs `f` and returns the status it tried to exit with, if any.
pub fn exit_status<F: FnOnce()>(f: F) -> Option<i32> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => None,
        Err(payload) => match payload.downcast::<Exited>() {
            Ok(exited) => Some(exited.0),
            Err(payload) => panic::resume_unwind(payload),
        },
    }
}
