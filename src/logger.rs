//! Colored console logging on stderr
//!
//! Levels: trace (verbose only), info, success, warn, error.
//! Quiet mode keeps errors only.

use colored::Colorize;
use std::fmt::Display;

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Normal output plus trace messages
    Verbose,
}

impl Verbosity {
    /// Derive verbosity from CLI flags; quiet wins
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

/// Log level of a single message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Trace,
    Info,
    Success,
    Warn,
    Error,
}

impl Level {
    fn min_verbosity(self) -> Verbosity {
        match self {
            Level::Trace => Verbosity::Verbose,
            Level::Info | Level::Success | Level::Warn => Verbosity::Normal,
            Level::Error => Verbosity::Quiet,
        }
    }
}

/// Console logger
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    verbosity: Verbosity,
}

impl Logger {
    /// Create a logger for the given verbosity
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Logger that prints nothing but errors
    pub fn quiet() -> Self {
        Self::new(Verbosity::Quiet)
    }

    /// Current verbosity
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Whether spinners should be drawn
    pub fn shows_progress(&self) -> bool {
        self.verbosity == Verbosity::Normal
    }

    pub fn trace(&self, message: impl Display) {
        self.log(Level::Trace, message);
    }

    pub fn info(&self, message: impl Display) {
        self.log(Level::Info, message);
    }

    pub fn success(&self, message: impl Display) {
        self.log(Level::Success, message);
    }

    pub fn warn(&self, message: impl Display) {
        self.log(Level::Warn, message);
    }

    pub fn error(&self, message: impl Display) {
        self.log(Level::Error, message);
    }

    fn log(&self, level: Level, message: impl Display) {
        if let Some(line) = self.format(level, &message.to_string()) {
            eprintln!("{}", line);
        }
    }

    /// Format a message, or `None` if the level is filtered out
    pub fn format(&self, level: Level, message: &str) -> Option<String> {
        if self.verbosity < level.min_verbosity() {
            return None;
        }

        let line = match level {
            Level::Trace => message.dimmed().to_string(),
            Level::Info => message.to_string(),
            Level::Success => format!("{} {}", "✓".green(), message.green()),
            Level::Warn => format!("{} {}", "warning:".yellow().bold(), message),
            Level::Error => format!("{} {}", "error:".red().bold(), message),
        };
        Some(line)
    }
}
