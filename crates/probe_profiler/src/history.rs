//! Frame-time ring buffer
//!
//! Keeps the most recent `capacity` frame durations (milliseconds) in
//! chronological order and derives FPS figures from them.

use std::collections::VecDeque;

/// Bounded FIFO of per-frame durations in milliseconds
#[derive(Clone, Debug)]
pub struct FrameHistory {
    /// Frame durations, oldest first
    frame_times: VecDeque<f64>,
    /// Maximum number of retained frames
    capacity: usize,
}

impl Default for FrameHistory {
    fn default() -> Self {
        Self::new(100)
    }
}

impl FrameHistory {
    /// Create with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    /// Push a frame duration, evicting the oldest entries past capacity
    pub fn push(&mut self, frame_time_ms: f64) {
        // Non-finite or negative durations come from clock glitches
        if !frame_time_ms.is_finite() || frame_time_ms < 0.0 {
            return;
        }

        self.frame_times.push_back(frame_time_ms);
        self.evict();
    }

    /// Change the capacity; shrinking drops the oldest frames immediately
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.evict();
    }

    fn evict(&mut self) {
        while self.frame_times.len() > self.capacity {
            self.frame_times.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.frame_times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame_times.is_empty()
    }

    /// Frame durations, oldest first
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.frame_times.iter().copied()
    }

    /// Sum of retained durations (ms)
    pub fn total_time(&self) -> f64 {
        self.frame_times.iter().sum()
    }

    /// Mean frame duration (ms), 0 when empty
    pub fn average_frame_time(&self) -> f64 {
        if self.frame_times.is_empty() {
            0.0
        } else {
            self.total_time() / self.frame_times.len() as f64
        }
    }

    /// Frames per second over the retained window: `len / (sum_ms / 1000)`
    pub fn average_fps(&self) -> f64 {
        let total_ms = self.total_time();
        if self.frame_times.is_empty() || total_ms <= 0.0 {
            return 0.0;
        }
        self.frame_times.len() as f64 / (total_ms / 1000.0)
    }

    /// Shortest retained frame (ms), 0 when empty
    pub fn min_frame_time(&self) -> f64 {
        self.frame_times.iter().copied().reduce(f64::min).unwrap_or(0.0)
    }

    /// Longest retained frame (ms), 0 when empty
    pub fn max_frame_time(&self) -> f64 {
        self.frame_times.iter().copied().fold(0.0, f64::max)
    }

    /// 1% low FPS (99th percentile frame time)
    pub fn one_percent_low_fps(&self) -> f64 {
        if self.frame_times.is_empty() {
            return 0.0;
        }

        let mut sorted: Vec<f64> = self.frame_times.iter().copied().collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let idx = (sorted.len() * 99 / 100).min(sorted.len() - 1);
        let percentile_time = sorted[idx];

        if percentile_time > 0.0 {
            1000.0 / percentile_time
        } else {
            0.0
        }
    }

    pub fn clear(&mut self) {
        self.frame_times.clear();
    }
}
