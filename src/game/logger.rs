//! Game event log with verbosity levels and in-memory capture
//!
//! Rule code never consults the logger. It only records what happened so a
//! host can print it or a test can inspect it.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::fmt;

/// Verbosity level for game output
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
)]
pub enum VerbosityLevel {
    Silent = 0,
    /// Wins only
    Minimal = 1,
    /// New deals, undo and redo
    #[default]
    Normal = 2,
    /// Every pickup, drop and stock click
    Verbose = 3,
}

/// Where events go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Printed when the verbosity allows
    #[default]
    Stdout,
    /// Kept in memory at every level, never printed
    Memory,
}

/// One recorded event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    /// One of "deal", "move", "stock", "history", "win"
    pub category: &'static str,
    pub message: String,
}

pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    captured: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    pub fn new() -> Self {
        GameLogger::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            output_mode: OutputMode::Stdout,
            captured: RefCell::new(Vec::new()),
        }
    }

    /// Keep events in memory instead of printing them
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    /// Events captured so far, oldest first
    pub fn logs(&self) -> Ref<'_, [LogEntry]> {
        Ref::map(self.captured.borrow(), Vec::as_slice)
    }

    /// Record an event; `Silent` events are dropped
    pub fn event(&self, level: VerbosityLevel, category: &'static str, message: &str) {
        if level == VerbosityLevel::Silent {
            return;
        }
        match self.output_mode {
            OutputMode::Memory => self.captured.borrow_mut().push(LogEntry {
                level,
                category,
                message: message.to_string(),
            }),
            OutputMode::Stdout if level <= self.verbosity => {
                if level == VerbosityLevel::Minimal {
                    println!("{message}");
                } else {
                    println!("  {message}");
                }
            }
            OutputMode::Stdout => {}
        }
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("captured", &self.captured.borrow().len())
            .finish()
    }
}

/// A cloned game logs on its own; it keeps the settings, not the entries
impl Clone for GameLogger {
    fn clone(&self) -> Self {
        GameLogger {
            verbosity: self.verbosity,
            output_mode: self.output_mode,
            captured: RefCell::new(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_keeps_every_level() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
        logger.enable_capture();

        logger.event(VerbosityLevel::Normal, "deal", "new deal");
        logger.event(VerbosityLevel::Minimal, "win", "won");
        logger.event(VerbosityLevel::Verbose, "stock", "dealt 3");

        let logs = logger.logs();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].message, "new deal");
        assert_eq!(logs[1].level, VerbosityLevel::Minimal);
        assert_eq!(logs[2].category, "stock");
    }

    #[test]
    fn test_silent_events_are_dropped() {
        let mut logger = GameLogger::new();
        logger.enable_capture();
        logger.event(VerbosityLevel::Silent, "move", "ignored");
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_stdout_mode_captures_nothing() {
        let logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
        logger.event(VerbosityLevel::Minimal, "win", "won");
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_clone_starts_empty() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Verbose);
        logger.enable_capture();
        logger.event(VerbosityLevel::Verbose, "move", "picked up");

        let cloned = logger.clone();
        assert_eq!(cloned.verbosity(), VerbosityLevel::Verbose);
        assert!(cloned.logs().is_empty());
        cloned.event(VerbosityLevel::Normal, "history", "undo");
        assert_eq!(cloned.logs().len(), 1);
        assert_eq!(logger.logs().len(), 1);
    }
}
