//! Command History
//!
//! An ordered, append-only sequence of previously submitted REPL lines
//! plus a browse cursor. Created empty per session; the cursor resets to
//! "not browsing" after every submission.

use std::collections::VecDeque;

/// Maximum number of history entries to keep
const MAX_HISTORY_ENTRIES: usize = 10000;

/// In-memory command history with a browse cursor
#[derive(Debug)]
pub struct CommandHistory {
    /// Submitted lines, oldest first
    entries: VecDeque<String>,
    /// Browse position; `None` means "not browsing"
    cursor: Option<usize>,
    /// Maximum history size
    max_size: usize,
}

impl CommandHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: None,
            max_size: MAX_HISTORY_ENTRIES,
        }
    }

    /// Create with a custom size bound
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            max_size,
            ..Self::new()
        }
    }

    /// Append a submitted line. Empty lines are not recorded.
    pub fn push(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        self.entries.push_back(line.to_string());
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
    }

    /// Reset the cursor to "not browsing"
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    /// Move the cursor toward older entries and return the line there.
    ///
    /// From "not browsing" this jumps to the most recent entry; at the
    /// oldest entry it stays put. Returns an empty string when the history
    /// is empty.
    pub fn up(&mut self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let index = match self.cursor {
            None => self.entries.len() - 1,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.cursor = Some(index);
        self.entries[index].clone()
    }

    /// Move the cursor toward newer entries and return the line there.
    ///
    /// Moving past the newest entry resets to "not browsing" and returns
    /// an empty string. A no-op when not browsing or when empty.
    pub fn down(&mut self) -> String {
        let Some(index) = self.cursor else {
            return String::new();
        };
        if self.entries.is_empty() {
            self.cursor = None;
            return String::new();
        }
        let next = index + 1;
        if next >= self.entries.len() {
            self.cursor = None;
            String::new()
        } else {
            self.cursor = Some(next);
            self.entries[next].clone()
        }
    }

    /// Number of recorded lines
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any lines have been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the cursor is currently browsing
    pub fn is_browsing(&self) -> bool {
        self.cursor.is_some()
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}
