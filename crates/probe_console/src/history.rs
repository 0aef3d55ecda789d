//! Command history
//!
//! Raw command lines in issuance order. Immediate repeats are collapsed and
//! the oldest lines are evicted past capacity. Also tracks a cursor for
//! up/down navigation from the input line.

use std::collections::VecDeque;

/// Bounded command history with navigation
#[derive(Clone, Debug)]
pub struct History {
    /// Command lines, oldest first
    entries: VecDeque<String>,
    /// Maximum retained lines
    max_entries: usize,
    /// Navigation cursor into `entries`
    cursor: Option<usize>,
    /// Input line saved when navigation started
    saved_input: Option<String>,
}

impl History {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries.min(256)),
            max_entries,
            cursor: None,
            saved_input: None,
        }
    }

    /// Record a command line. Returns whether it was appended.
    pub fn add(&mut self, command: &str) -> bool {
        if command.trim().is_empty() {
            return false;
        }

        if self.entries.back().is_some_and(|last| last == command) {
            self.reset_navigation();
            return false;
        }

        self.entries.push_back(command.to_string());
        self.trim();
        self.reset_navigation();
        true
    }

    /// Change capacity; shrinking drops the oldest lines immediately
    pub fn set_max_entries(&mut self, max_entries: usize) {
        self.max_entries = max_entries;
        self.trim();
        self.reset_navigation();
    }

    fn trim(&mut self) {
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Line at index (0 = oldest)
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Up to `count` most recent lines, oldest first
    pub fn recent(&self, count: usize) -> Vec<&str> {
        let start = self.entries.len().saturating_sub(count);
        self.entries.range(start..).map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.reset_navigation();
    }

    /// Step to an older line. `current` is remembered on the first step so
    /// that stepping back past the newest line restores it.
    pub fn older(&mut self, current: &str) -> Option<&str> {
        let newest = self.entries.len().checked_sub(1)?;

        let index = match self.cursor {
            None => {
                self.saved_input = Some(current.to_string());
                newest
            }
            Some(i) => i.saturating_sub(1),
        };

        self.cursor = Some(index);
        self.get(index)
    }

    /// Step to a newer line, or back to the saved input past the newest
    pub fn newer(&mut self) -> Option<String> {
        let index = self.cursor? + 1;

        if index >= self.entries.len() {
            self.cursor = None;
            return self.saved_input.take();
        }

        self.cursor = Some(index);
        self.get(index).map(str::to_string)
    }

    pub fn reset_navigation(&mut self) {
        self.cursor = None;
        self.saved_input = None;
    }

    /// Current navigation cursor
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_skips_empty() {
        let mut history = History::new(10);
        assert!(!history.add(""));
        assert!(!history.add("   "));
        assert!(history.is_empty());
    }

    #[test]
    fn test_consecutive_duplicates_collapse() {
        let mut history = History::new(10);
        assert!(history.add("help"));
        assert!(!history.add("help"));
        assert!(history.add("echo hi"));
        assert!(history.add("help"));

        assert_eq!(history.iter().collect::<Vec<_>>(), vec!["help", "echo hi", "help"]);
    }

    #[test]
    fn test_capacity() {
        let mut history = History::new(3);
        for i in 0..5 {
            history.add(&format!("cmd{}", i));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.get(0), Some("cmd2"));
        assert_eq!(history.recent(2), vec!["cmd3", "cmd4"]);
    }

    #[test]
    fn test_navigation() {
        let mut history = History::new(10);
        history.add("first");
        history.add("second");
        history.add("third");

        assert_eq!(history.older("typing"), Some("third"));
        assert_eq!(history.older("ignored"), Some("second"));
        assert_eq!(history.older("ignored"), Some("first"));
        assert_eq!(history.older("ignored"), Some("first"));

        assert_eq!(history.newer().as_deref(), Some("second"));
        assert_eq!(history.newer().as_deref(), Some("third"));
        assert_eq!(history.newer().as_deref(), Some("typing"));
        assert_eq!(history.cursor(), None);
        assert_eq!(history.newer(), None);
    }

    #[test]
    fn test_navigation_empty() {
        let mut history = History::new(10);
        assert_eq!(history.older("x"), None);
        assert_eq!(history.newer(), None);
    }
}
