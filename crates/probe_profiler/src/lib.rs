//! # probe_profiler - Scoped-Timing Profiler
//!
//! Measures wall-clock duration of named code spans and keeps running
//! statistics per name:
//! - Named spans opened with [`Profiler::start_profile`] / [`Profiler::end_profile`]
//!   or, preferably, a scoped guard that closes the span on every exit path
//! - Per-name count, total, min, max, average and last duration
//! - Per-frame timing in a bounded ring buffer for FPS
//! - CSV and JSON snapshots
//!
//! ## Usage
//!
//! ```ignore
//! use probe_profiler::Profiler;
//!
//! let mut profiler = Profiler::new();
//! profiler.initialize();
//!
//! profiler.on_frame_start();
//! {
//!     let mut frame = profiler.scope("frame");
//!     let _physics = frame.scope("physics");
//!     // ... step physics ...
//! }
//! profiler.on_frame_end();
//!
//! println!("FPS: {:.1}", profiler.average_fps());
//! profiler.export_json("profile.json")?;
//! ```
//!
//! Spans with the same name must not nest or overlap: a second
//! `start_profile(name)` overwrites the first start time.

pub mod display;
pub mod export;
pub mod history;
pub mod sample;
pub mod scope;

pub use display::DisplayMode;
pub use export::ProfileReport;
pub use history::FrameHistory;
pub use sample::ProfileSample;
pub use scope::{ProfileScope, SharedProfiler, SharedScope};

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::time::Instant;

use probe_core::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Profiler errors
#[derive(Debug, Error)]
pub enum ProfilerError {
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Profiler configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfilerConfig {
    /// Whether spans and frames are recorded
    pub enabled: bool,
    /// Frame-time ring buffer capacity
    pub max_history: usize,
    /// Durations strictly below this (ms) are discarded
    pub min_time_ms: f64,
    /// Which overlay is rendered
    pub display_mode: DisplayMode,
    /// Overlay top-left corner (pixels)
    pub overlay_position: [f32; 2],
    /// Overlay text line spacing (pixels)
    pub line_height: f32,
    /// Overlay text color
    pub text_color: Color,
    /// Frame graph size (pixels)
    pub graph_size: [f32; 2],
    /// Frame graph line color
    pub graph_color: Color,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_history: 100,
            min_time_ms: 0.0,
            display_mode: DisplayMode::Simple,
            overlay_position: [10.0, 10.0],
            line_height: 16.0,
            text_color: Color::WHITE,
            graph_size: [200.0, 60.0],
            graph_color: Color::GREEN,
        }
    }
}

/// Scoped-timing profiler
#[derive(Debug)]
pub struct Profiler {
    /// Configuration
    config: ProfilerConfig,
    /// Construction-time config; `initialize` restores history size and threshold from it
    defaults: ProfilerConfig,
    /// Set by `initialize`, cleared by `shutdown`
    initialized: bool,
    /// Aggregated statistics by span name
    samples: BTreeMap<String, ProfileSample>,
    /// Open spans and their start times
    active_spans: HashMap<String, Instant>,
    /// Recent frame durations
    frame_history: FrameHistory,
    /// Frames seen since the last clear
    frame_count: u64,
    /// Sum of all frame durations since the last clear (seconds)
    total_frame_time: f64,
    /// Start of the current frame, between the frame hooks
    frame_start: Option<Instant>,
}

impl Profiler {
    /// Create an uninitialized profiler with default configuration
    pub fn new() -> Self {
        Self::with_config(ProfilerConfig::default())
    }

    /// Create an uninitialized profiler with custom configuration
    pub fn with_config(config: ProfilerConfig) -> Self {
        let frame_history = FrameHistory::new(config.max_history);
        Self {
            defaults: config.clone(),
            config,
            initialized: false,
            samples: BTreeMap::new(),
            active_spans: HashMap::new(),
            frame_history,
            frame_count: 0,
            total_frame_time: 0.0,
            frame_start: None,
        }
    }

    /// Reset all state and start recording. No-op if already initialized.
    ///
    /// History size and minimum time return to the values the profiler was
    /// constructed with (`ProfilerConfig::default()` for [`Profiler::new`]);
    /// setter changes made before this call are discarded.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        self.clear();
        self.config.enabled = true;
        self.config.max_history = self.defaults.max_history;
        self.config.min_time_ms = self.defaults.min_time_ms;
        self.frame_history.set_capacity(self.config.max_history);
        self.initialized = true;

        log::debug!(
            "Profiler initialized (history: {}, min time: {} ms)",
            self.config.max_history,
            self.config.min_time_ms
        );
    }

    /// Drop all recorded data and stop recording
    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }

        self.clear();
        self.initialized = false;
        log::debug!("Profiler shut down");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    /// Whether timing calls currently do anything
    #[inline]
    fn is_recording(&self) -> bool {
        self.initialized && self.config.enabled
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    pub fn max_history(&self) -> usize {
        self.config.max_history
    }

    /// Change the frame-time ring buffer capacity
    pub fn set_max_history(&mut self, max_history: usize) {
        self.config.max_history = max_history;
        self.frame_history.set_capacity(max_history);
    }

    pub fn min_time(&self) -> f64 {
        self.config.min_time_ms
    }

    /// Set the noise threshold (ms) below which durations are discarded
    pub fn set_min_time(&mut self, min_time_ms: f64) {
        self.config.min_time_ms = min_time_ms;
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.config.display_mode
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.config.display_mode = mode;
    }

    /// Open a named span. Overwrites the start time if already open.
    pub fn start_profile(&mut self, name: &str) {
        if !self.is_recording() {
            return;
        }

        let now = Instant::now();
        match self.active_spans.get_mut(name) {
            Some(start) => *start = now,
            None => {
                self.active_spans.insert(name.to_owned(), now);
            }
        }
    }

    /// Close a named span and record its duration. No-op if not open.
    pub fn end_profile(&mut self, name: &str) {
        if !self.is_recording() {
            return;
        }

        if let Some(start) = self.active_spans.remove(name) {
            let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
            self.update_profile_data(name, elapsed_ms);
        }
    }

    /// Open a span that closes when the returned guard is dropped
    pub fn scope<'a>(&'a mut self, name: &'a str) -> ProfileScope<'a> {
        ProfileScope::new(self, name)
    }

    /// Whether a span with this name is currently open
    pub fn is_profiling(&self, name: &str) -> bool {
        self.active_spans.contains_key(name)
    }

    /// Fold one duration (ms) into the statistics for `name`.
    ///
    /// Durations below the minimum-time threshold are discarded entirely.
    pub fn update_profile_data(&mut self, name: &str, elapsed_ms: f64) {
        if !elapsed_ms.is_finite() || elapsed_ms < self.config.min_time_ms {
            return;
        }

        match self.samples.get_mut(name) {
            Some(sample) => sample.record(elapsed_ms),
            None => {
                let mut sample = ProfileSample::new(name);
                sample.record(elapsed_ms);
                self.samples.insert(name.to_owned(), sample);
            }
        }
    }

    /// Record one frame of `delta_time` seconds
    pub fn update(&mut self, delta_time: f64) {
        if !self.is_recording() {
            return;
        }

        self.frame_history.push(delta_time * 1000.0);
        self.frame_count += 1;
        self.total_frame_time += delta_time;
    }

    /// Mark the start of a frame
    pub fn on_frame_start(&mut self) {
        if !self.is_recording() {
            return;
        }
        self.frame_start = Some(Instant::now());
    }

    /// Mark the end of a frame and record its wall-clock duration
    pub fn on_frame_end(&mut self) {
        if let Some(start) = self.frame_start.take() {
            self.update(start.elapsed().as_secs_f64());
        }
    }

    /// Frames per second over the frame-time ring buffer
    pub fn average_fps(&self) -> f64 {
        self.frame_history.average_fps()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Sum of all recorded frame durations (seconds)
    pub fn total_frame_time(&self) -> f64 {
        self.total_frame_time
    }

    pub fn frame_history(&self) -> &FrameHistory {
        &self.frame_history
    }

    /// Statistics for one span name
    pub fn sample(&self, name: &str) -> Option<&ProfileSample> {
        self.samples.get(name)
    }

    /// All statistics, ordered by name
    pub fn samples(&self) -> impl Iterator<Item = &ProfileSample> {
        self.samples.values()
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Drop all samples, open spans and frame history
    pub fn clear(&mut self) {
        self.samples.clear();
        self.active_spans.clear();
        self.frame_history.clear();
        self.frame_count = 0;
        self.total_frame_time = 0.0;
        self.frame_start = None;
    }

    /// Drop the statistics for one span name. Returns whether it existed.
    pub fn reset_profile(&mut self, name: &str) -> bool {
        self.samples.remove(name).is_some()
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profiler() -> Profiler {
        let mut profiler = Profiler::new();
        profiler.initialize();
        profiler
    }

    #[test]
    fn test_uninitialized_is_noop() {
        let mut profiler = Profiler::new();
        profiler.start_profile("a");
        profiler.end_profile("a");
        profiler.update(0.016);

        assert!(!profiler.is_initialized());
        assert_eq!(profiler.sample_count(), 0);
        assert_eq!(profiler.frame_count(), 0);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut profiler = profiler();
        profiler.update_profile_data("a", 1.0);
        profiler.initialize();

        assert_eq!(profiler.sample_count(), 1);
    }

    #[test]
    fn test_start_end_records_sample() {
        let mut profiler = profiler();
        profiler.start_profile("work");
        assert!(profiler.is_profiling("work"));
        profiler.end_profile("work");

        assert!(!profiler.is_profiling("work"));
        let sample = profiler.sample("work").unwrap();
        assert_eq!(sample.call_count, 1);
        assert!(sample.total_time >= 0.0);
    }

    #[test]
    fn test_end_without_start_is_noop() {
        let mut profiler = profiler();
        profiler.end_profile("never_started");
        assert!(profiler.sample("never_started").is_none());
    }

    #[test]
    fn test_disabled_records_nothing() {
        let mut profiler = profiler();
        profiler.set_enabled(false);

        profiler.start_profile("a");
        assert!(!profiler.is_profiling("a"));
        profiler.end_profile("a");
        profiler.update(0.016);

        assert_eq!(profiler.sample_count(), 0);
        assert_eq!(profiler.frame_count(), 0);
    }

    #[test]
    fn test_restart_overwrites_open_span() {
        let mut profiler = profiler();
        profiler.start_profile("a");
        profiler.start_profile("a");
        profiler.end_profile("a");
        profiler.end_profile("a");

        assert_eq!(profiler.sample("a").unwrap().call_count, 1);
    }

    #[test]
    fn test_threshold_discards() {
        let mut profiler = profiler();
        profiler.set_min_time(1.0);

        profiler.update_profile_data("fast", 0.5);
        assert!(profiler.sample("fast").is_none());

        profiler.update_profile_data("fast", 1.0);
        profiler.update_profile_data("fast", 0.999);
        assert_eq!(profiler.sample("fast").unwrap().call_count, 1);
    }

    #[test]
    fn test_update_frame_time() {
        let mut profiler = profiler();
        profiler.update(0.020);
        profiler.update(0.030);

        assert_eq!(profiler.frame_count(), 2);
        assert!((profiler.total_frame_time() - 0.050).abs() < 1e-12);
        assert!((profiler.average_fps() - 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_frame_hooks() {
        let mut profiler = profiler();
        profiler.on_frame_start();
        profiler.on_frame_end();
        // A second end without a start records nothing
        profiler.on_frame_end();

        assert_eq!(profiler.frame_count(), 1);
    }

    #[test]
    fn test_clear_and_reset_profile() {
        let mut profiler = profiler();
        profiler.update_profile_data("a", 1.0);
        profiler.update_profile_data("b", 2.0);
        profiler.update(0.016);

        assert!(profiler.reset_profile("a"));
        assert!(!profiler.reset_profile("a"));
        assert!(profiler.sample("b").is_some());

        profiler.start_profile("open");
        profiler.clear();
        assert_eq!(profiler.sample_count(), 0);
        assert!(!profiler.is_profiling("open"));
        assert!(profiler.frame_history().is_empty());
        assert_eq!(profiler.average_fps(), 0.0);
    }

    #[test]
    fn test_shutdown_resets() {
        let mut profiler = profiler();
        profiler.update_profile_data("a", 1.0);
        profiler.shutdown();

        assert!(!profiler.is_initialized());
        assert_eq!(profiler.sample_count(), 0);
    }

    #[test]
    fn test_scope_guard_closes_span() {
        let mut profiler = profiler();
        {
            let mut outer = profiler.scope("outer");
            assert!(outer.is_profiling("outer"));
            let _inner = outer.scope("inner");
        }

        assert!(!profiler.is_profiling("outer"));
        assert_eq!(profiler.sample("outer").unwrap().call_count, 1);
        assert_eq!(profiler.sample("inner").unwrap().call_count, 1);
    }

    #[test]
    fn test_initialize_restores_history_and_threshold() {
        let mut profiler = Profiler::new();
        profiler.set_enabled(false);
        profiler.set_max_history(3);
        profiler.set_min_time(5.0);
        profiler.initialize();

        assert!(profiler.is_enabled());
        assert_eq!(profiler.max_history(), 100);
        assert_eq!(profiler.min_time(), 0.0);
        assert_eq!(profiler.frame_history().capacity(), 100);

        // Re-initializing after a shutdown starts from the same values
        profiler.set_min_time(2.0);
        profiler.shutdown();
        profiler.initialize();
        assert_eq!(profiler.min_time(), 0.0);
    }

    #[test]
    fn test_initialize_keeps_constructed_config() {
        let mut profiler = Profiler::with_config(ProfilerConfig {
            max_history: 10,
            min_time_ms: 0.5,
            ..Default::default()
        });
        profiler.set_max_history(2);
        profiler.initialize();

        assert_eq!(profiler.max_history(), 10);
        assert_eq!(profiler.min_time(), 0.5);
    }

    #[test]
    fn test_set_max_history_shrinks() {
        let mut profiler = profiler();
        for _ in 0..10 {
            profiler.update(0.016);
        }
        profiler.set_max_history(4);

        assert_eq!(profiler.frame_history().len(), 4);
        assert_eq!(profiler.frame_count(), 10);
    }
}
