//! Handles all user-facing output for the harness.
//!
//! The runner never prints directly. Summary lines go to an "out" sink,
//! failure details and traces go to an "err" sink. Terminal sinks colorize
//! by [`Tone`], buffer sinks collect plain text for embedding and testing.

// ============================================================================
// OUTPUT SINKS: OutputBuffer, SharedBuffer, and TerminalSink implementations
// ============================================================================

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// What a line of output is for. Terminal sinks pick a color from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Trace,
    Failure,
    Success,
}

impl Tone {
    fn color_spec(self) -> Option<ColorSpec> {
        let mut spec = ColorSpec::new();
        match self {
            Tone::Plain => return None,
            Tone::Trace => spec.set_fg(Some(Color::Cyan)),
            Tone::Failure => spec.set_fg(Some(Color::Red)).set_bold(true),
            Tone::Success => spec.set_fg(Some(Color::Green)).set_bold(true),
        };
        Some(spec)
    }
}

/// Destination for line-oriented output. Each call emits one line.
pub trait OutputSink {
    fn emit(&mut self, tone: Tone, text: &str);
}

/// A null output sink for running without output.
pub struct NullSink;

impl OutputSink for NullSink {
    fn emit(&mut self, _tone: Tone, _text: &str) {}
}

/// OutputBuffer: collects output into a String for testing or programmatic capture.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    pub buffer: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.buffer.lines()
    }
}

impl OutputSink for OutputBuffer {
    fn emit(&mut self, _tone: Tone, text: &str) {
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }
}

/// A cloneable handle to an [`OutputBuffer`], so output can be inspected
/// while the runner still owns a sink.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(pub Rc<RefCell<OutputBuffer>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything emitted so far.
    pub fn contents(&self) -> String {
        self.0.borrow().as_str().to_owned()
    }
}

impl OutputSink for SharedBuffer {
    fn emit(&mut self, tone: Tone, text: &str) {
        self.0.borrow_mut().emit(tone, text);
    }
}

/// TerminalSink: writes to stdout or stderr through `termcolor`.
pub struct TerminalSink {
    stream: StandardStream,
}

impl TerminalSink {
    pub fn stdout(choice: ColorChoice) -> Self {
        Self {
            stream: StandardStream::stdout(choice),
        }
    }

    pub fn stderr(choice: ColorChoice) -> Self {
        Self {
            stream: StandardStream::stderr(choice),
        }
    }
}

impl OutputSink for TerminalSink {
    fn emit(&mut self, tone: Tone, text: &str) {
        match tone.color_spec() {
            Some(spec) => {
                let _ = self.stream.set_color(&spec);
                let _ = write!(self.stream, "{}", text);
                let _ = self.stream.reset();
                let _ = writeln!(self.stream);
            }
            None => {
                let _ = writeln!(self.stream, "{}", text);
            }
        }
        let _ = self.stream.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_collects_one_line_per_emit() {
        let mut buffer = OutputBuffer::new();
        buffer.emit(Tone::Plain, "first");
        buffer.emit(Tone::Failure, "second");
        assert_eq!(buffer.as_str(), "first\nsecond\n");
        assert_eq!(buffer.lines().count(), 2);
    }

    #[test]
    fn shared_buffer_clones_see_the_same_output() {
        let shared = SharedBuffer::new();
        let mut sink = shared.clone();
        sink.emit(Tone::Trace, "traced");
        assert_eq!(shared.contents(), "traced\n");
    }

    #[test]
    fn plain_tone_has_no_color() {
        assert!(Tone::Plain.color_spec().is_none());
        assert!(Tone::Failure.color_spec().is_some());
    }
}
