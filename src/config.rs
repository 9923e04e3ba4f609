//! Run-time preferences for a test run.
//!
//! Preferences are plain data. The CLI layer builds them from flags
//! (see [`crate::cli::args::TestArgs`]) and embedding applications can build
//! them directly.

use clap::ValueEnum;
use termcolor::ColorChoice;

/// Verbosity at which each test entry and exit is traced.
pub const TRACE_TESTS: u8 = 1;
/// Verbosity at which every assertion is traced.
pub const TRACE_ASSERTIONS: u8 = 2;

/// When to colorize terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    /// Colorize only when the stream is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolves the mode into a `termcolor` choice for the given stream.
    pub fn choice_for(self, stream: atty::Stream) -> ColorChoice {
        match self {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto if atty::is(stream) => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
        }
    }
}

/// Options that affect how a run is traced and reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    /// 0 prints only failures and the summary, 1 traces tests, 2 traces assertions.
    pub verbosity: u8,
    /// Print failure messages even for inverted tests, where failing is expected.
    pub show_failures: bool,
    pub color: ColorMode,
}

impl Preferences {
    pub fn traces(&self, level: u8) -> bool {
        self.verbosity >= level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preferences_are_quiet() {
        let prefs = Preferences::default();
        assert_eq!(prefs.verbosity, 0);
        assert!(!prefs.show_failures);
        assert!(!prefs.traces(TRACE_TESTS));
    }

    #[test]
    fn verbosity_levels_are_cumulative() {
        let prefs = Preferences {
            verbosity: TRACE_ASSERTIONS,
            ..Preferences::default()
        };
        assert!(prefs.traces(TRACE_TESTS));
        assert!(prefs.traces(TRACE_ASSERTIONS));
    }

    #[test]
    fn explicit_color_modes_ignore_the_terminal() {
        assert_eq!(
            ColorMode::Never.choice_for(atty::Stream::Stderr),
            ColorChoice::Never
        );
        assert_eq!(
            ColorMode::Always.choice_for(atty::Stream::Stderr),
            ColorChoice::Always
        );
    }
}
