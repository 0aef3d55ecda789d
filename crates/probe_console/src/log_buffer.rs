//! Console log buffer
//!
//! Entries keep insertion order, count their remaining lifetime down on
//! every update, and are dropped once it reaches zero. The buffer is bounded;
//! the oldest entry goes first on overflow.

use std::collections::VecDeque;

use probe_core::Color;
use serde::{Deserialize, Serialize};

/// Log severity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Diagnostic detail, hidden by default
    Debug,
    /// Normal information
    Info,
    /// Something looks wrong
    Warning,
    /// Something failed
    Error,
}

impl LogLevel {
    pub const ALL: [Self; 4] = [Self::Debug, Self::Info, Self::Warning, Self::Error];

    /// Stable index, used for per-level filter tables
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Self::Debug => "[DEBUG]",
            Self::Info => "[INFO]",
            Self::Warning => "[WARN]",
            Self::Error => "[ERROR]",
        }
    }

    /// Display color for this level
    pub fn color(self) -> Color {
        match self {
            Self::Debug => Color::GRAY,
            Self::Info => Color::WHITE,
            Self::Warning => Color::YELLOW,
            Self::Error => Color::RED,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Parse a level name (case-insensitive, `warn` accepted)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Matching `log` crate level
    pub fn as_log_level(self) -> log::Level {
        match self {
            Self::Debug => log::Level::Debug,
            Self::Info => log::Level::Info,
            Self::Warning => log::Level::Warn,
            Self::Error => log::Level::Error,
        }
    }
}

/// A single console message
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    level: LogLevel,
    message: String,
    /// Wall-clock time the entry was created (`HH:MM:SS`)
    timestamp: String,
    /// Seconds the entry stays visible
    lifetime: f32,
    /// Seconds elapsed since the entry was added
    age: f64,
}

impl LogEntry {
    /// Create an entry stamped with the current local time
    pub fn new(level: LogLevel, message: impl Into<String>, lifetime: f32) -> Self {
        Self::with_timestamp(
            level,
            message,
            chrono::Local::now().format("%H:%M:%S").to_string(),
            lifetime,
        )
    }

    /// Create an entry with an explicit timestamp string
    pub fn with_timestamp(
        level: LogLevel,
        message: impl Into<String>,
        timestamp: impl Into<String>,
        lifetime: f32,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: timestamp.into(),
            lifetime,
            age: 0.0,
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    /// Seconds elapsed since the entry was added
    pub fn age(&self) -> f64 {
        self.age
    }

    /// Seconds until the entry expires, never negative
    pub fn remaining_lifetime(&self) -> f32 {
        (f64::from(self.lifetime) - self.age).max(0.0) as f32
    }

    /// Age the entry by `delta_time` seconds. Non-finite or negative
    /// deltas are ignored.
    pub fn advance(&mut self, delta_time: f32) {
        if delta_time.is_finite() && delta_time > 0.0 {
            self.age += f64::from(delta_time);
        }
    }

    pub fn is_expired(&self) -> bool {
        self.age >= f64::from(self.lifetime)
    }

    /// `[HH:MM:SS] [LEVEL] message`
    pub fn format(&self) -> String {
        format!("[{}] {} {}", self.timestamp, self.level.prefix(), self.message)
    }
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format())
    }
}

/// Bounded, time-decaying list of log entries
#[derive(Clone, Debug)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
    max_entries: usize,
}

impl LogBuffer {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries.min(1024)),
            max_entries,
        }
    }

    /// Append an entry, dropping the oldest past capacity
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_back(entry);
        self.trim();
    }

    /// Change capacity; shrinking drops the oldest entries immediately
    pub fn set_max_entries(&mut self, max_entries: usize) {
        self.max_entries = max_entries;
        self.trim();
    }

    fn trim(&mut self) {
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Age every entry by `delta_time` seconds and drop expired ones.
    /// Non-finite or negative deltas age nothing.
    ///
    /// Returns the number of entries removed.
    pub fn update(&mut self, delta_time: f32) -> usize {
        let before = self.entries.len();
        for entry in self.entries.iter_mut() {
            entry.advance(delta_time);
        }
        self.entries.retain(|e| !e.is_expired());
        before - self.entries.len()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest entry
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Number of entries at a given level
    pub fn count_level(&self, level: LogLevel) -> usize {
        self.entries.iter().filter(|e| e.level == level).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str, lifetime: f32) -> LogEntry {
        LogEntry::with_timestamp(LogLevel::Info, message, "12:00:00", lifetime)
    }

    #[test]
    fn test_level_names() {
        assert_eq!(LogLevel::from_name("WARN"), Some(LogLevel::Warning));
        assert_eq!(LogLevel::from_name("error"), Some(LogLevel::Error));
        assert_eq!(LogLevel::from_name("verbose"), None);
        for level in LogLevel::ALL {
            assert_eq!(LogLevel::from_name(level.name()), Some(level));
        }
    }

    #[test]
    fn test_entry_format() {
        let entry = LogEntry::with_timestamp(LogLevel::Error, "disk full", "09:15:00", 5.0);
        assert_eq!(entry.format(), "[09:15:00] [ERROR] disk full");
        assert_eq!(entry.to_string(), entry.format());
    }

    #[test]
    fn test_entry_timestamp_shape() {
        let entry = LogEntry::new(LogLevel::Info, "now", 1.0);
        let parts: Vec<&str> = entry.timestamp().split(':').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.len() == 2));
    }

    #[test]
    fn test_buffer_overflow_drops_oldest() {
        let mut buffer = LogBuffer::new(2);
        buffer.push(entry("a", 1.0));
        buffer.push(entry("b", 1.0));
        buffer.push(entry("c", 1.0));

        let messages: Vec<&str> = buffer.iter().map(|e| e.message()).collect();
        assert_eq!(messages, vec!["b", "c"]);
    }

    #[test]
    fn test_buffer_expiry() {
        let mut buffer = LogBuffer::new(10);
        buffer.push(entry("short", 1.0));
        buffer.push(entry("long", 3.0));

        assert_eq!(buffer.update(0.5), 0);
        assert_eq!(buffer.update(0.5), 1);
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.last().unwrap().message(), "long");
        assert_eq!(buffer.last().unwrap().remaining_lifetime(), 2.0);
    }

    #[test]
    fn test_expiry_at_frame_rate_deltas() {
        for (lifetime, fps) in [(1.0, 60.0), (2.0, 30.0), (0.5, 144.0)] {
            let mut buffer = LogBuffer::new(10);
            buffer.push(entry("frame", lifetime));

            let frames = (lifetime * fps).round() as usize;
            let dt = 1.0 / fps;
            for _ in 0..frames - 1 {
                buffer.update(dt);
            }
            assert_eq!(buffer.len(), 1, "expired early at {} fps", fps);

            buffer.update(dt);
            assert!(buffer.is_empty(), "survived {} frames at {} fps", frames, fps);
        }
    }

    #[test]
    fn test_non_finite_delta_is_ignored() {
        let mut buffer = LogBuffer::new(10);
        buffer.push(entry("a", 1.0));

        assert_eq!(buffer.update(f32::NAN), 0);
        assert_eq!(buffer.update(f32::INFINITY), 0);
        assert_eq!(buffer.update(-5.0), 0);
        assert_eq!(buffer.last().unwrap().remaining_lifetime(), 1.0);

        assert_eq!(buffer.update(1.0), 1);
    }

    #[test]
    fn test_count_level() {
        let mut buffer = LogBuffer::new(10);
        buffer.push(entry("a", 1.0));
        buffer.push(LogEntry::with_timestamp(LogLevel::Error, "b", "", 1.0));

        assert_eq!(buffer.count_level(LogLevel::Info), 1);
        assert_eq!(buffer.count_level(LogLevel::Error), 1);
        assert_eq!(buffer.count_level(LogLevel::Debug), 0);
    }
}
