//! The terminal/log panel
//!
//! An append-only list of timestamped lines, each tagged with a [`Severity`].
//! Run output, console output from scripts and editor notices all land here.

use chrono::{DateTime, Local};

/// Display class of a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Neutral,
    Emphasis,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub severity: Severity,
}

impl LogEntry {
    /// `HH:MM:SS` of the entry
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogPanel {
    entries: Vec<LogEntry>,
    /// First visible entry. `usize::MAX` means "stick to the bottom"; the
    /// renderer clamps it.
    pub scroll: usize,
}

impl LogPanel {
    pub fn new() -> Self {
        LogPanel {
            entries: Vec::new(),
            scroll: 0,
        }
    }

    /// Append a line and scroll to it
    pub fn log(&mut self, message: impl Into<String>, severity: Severity) {
        let message = message.into();
        match severity {
            Severity::Error => tracing::warn!(target: "terminal", "{}", message),
            _ => tracing::debug!(target: "terminal", "{}", message),
        }
        self.entries.push(LogEntry {
            timestamp: Local::now(),
            message,
            severity,
        });
        self.scroll = usize::MAX;
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.log(message, Severity::Neutral);
    }

    pub fn emphasis(&mut self, message: impl Into<String>) {
        self.log(message, Severity::Emphasis);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.log(message, Severity::Error);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.scroll = 0;
    }

    /// Rows the panel draws; a multi-line message takes one row per line
    pub fn row_count(&self) -> usize {
        self.entries.iter().map(|e| e.message.split('\n').count()).sum()
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.min(self.row_count()).saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_add(lines);
    }
}
