//! Submitted-line history with up/down browsing.

use std::collections::VecDeque;

/// Maximum number of history entries to retain.
pub const HISTORY_CAPACITY: usize = 100;

/// Bounded history. Entries are never deduplicated or edited.
///
/// While browsing, `index` points at the entry on screen and `saved_line`
/// holds whatever the user had typed before the first Up.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    capacity: usize,
    index: Option<usize>,
    saved_line: String,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl History {
    /// Empty history holding up to [`HISTORY_CAPACITY`] entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty history holding up to `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            index: None,
            saved_line: String::new(),
        }
    }

    /// Append a line, evicting the oldest entry when full.
    pub fn push(&mut self, line: &str) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_back(line.to_string());
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Step to an older entry. `current` is the edit buffer, saved on the
    /// first step. Returns the line to show, or `None` when nothing changes.
    pub fn older(&mut self, current: &str) -> Option<&str> {
        let next = match self.index {
            None if self.entries.is_empty() => return None,
            None => {
                self.saved_line = current.to_string();
                self.entries.len() - 1
            },
            Some(0) => return None,
            Some(i) => i - 1,
        };
        self.index = Some(next);
        self.entries.get(next).map(String::as_str)
    }

    /// Step to a newer entry. Past the newest, browsing stops and the saved
    /// line comes back.
    pub fn newer(&mut self) -> Option<String> {
        let i = self.index?;
        if i + 1 < self.entries.len() {
            self.index = Some(i + 1);
            self.entries.get(i + 1).cloned()
        } else {
            self.index = None;
            Some(std::mem::take(&mut self.saved_line))
        }
    }

    /// Stop browsing and forget the saved line.
    pub fn reset(&mut self) {
        self.index = None;
        self.saved_line.clear();
    }

    pub fn is_browsing(&self) -> bool {
        self.index.is_some()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
