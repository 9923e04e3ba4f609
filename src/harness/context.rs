use std::fmt;
use std::panic::Location;

use super::{Site, UNNAMED};

/// Lifecycle of one test scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestState {
    /// Pushed on the stack, body not yet invoked.
    Created,
    BodyRunning,
    /// The body returned normally.
    Completed,
    /// The body was abandoned by an abort.
    Aborted,
}

impl TestState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TestState::Completed | TestState::Aborted)
    }

    /// Whether `self -> next` is an edge of the lifecycle.
    pub fn can_advance_to(self, next: TestState) -> bool {
        matches!(
            (self, next),
            (TestState::Created, TestState::BodyRunning)
                | (TestState::BodyRunning, TestState::Completed)
                | (TestState::BodyRunning, TestState::Aborted)
        )
    }
}

/// One entry of the test context stack.
#[derive(Debug, Clone)]
pub struct TestContext {
    name: String,
    inverted: bool,
    state: TestState,
    location: &'static Location<'static>,
}

impl TestContext {
    pub(crate) fn new(name: &str, inverted: bool, location: &'static Location<'static>) -> Self {
        let name = if name.is_empty() { UNNAMED } else { name };
        Self {
            name: name.to_string(),
            inverted,
            state: TestState::Created,
            location,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn state(&self) -> TestState {
        self.state
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Moves to `next`, returning false (and staying put) on an illegal edge.
    pub(crate) fn advance(&mut self, next: TestState) -> bool {
        if !self.state.can_advance_to(next) {
            return false;
        }
        self.state = next;
        true
    }
}

/// The assertion currently being checked, from `prepare` until its result is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionContext {
    pub site: Site,
    pub expr: String,
}

impl AssertionContext {
    pub fn new(site: Site, expr: &str) -> Self {
        Self {
            site,
            expr: expr.to_string(),
        }
    }
}

impl fmt::Display for AssertionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.site.fmt(f)
    }
}
