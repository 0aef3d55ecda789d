//! # probe_console - In-Game Command Console
//!
//! A text console for the host's debug overlay:
//! - Typed command lines dispatched to registered handlers
//! - A bounded log whose entries expire after a configurable lifetime
//! - Per-level display filters (Debug hidden by default)
//! - Deduplicated command history and prefix autocomplete
//!
//! ## Architecture
//!
//! ```text
//! Input line ──► History ──► tokenize ──► CommandRegistry ──► Builtin / Handler
//!                                                                  │
//!                                  LogBuffer ◄── errors, output ◄──┘
//! ```
//!
//! Handler failures (returned errors and panics) are caught at the dispatch
//! boundary and turned into Error log lines; they never reach the host.

pub mod builtins;
pub mod command;
pub mod history;
pub mod log_buffer;

pub use command::{
    require_arg, tokenize, Builtin, CommandBinding, CommandError, CommandFn, CommandKind,
    CommandRegistry, CommandResult,
};
pub use history::History;
pub use log_buffer::{LogBuffer, LogEntry, LogLevel};

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use probe_core::{Color, DebugRenderer, Vec2};
use serde::{Deserialize, Serialize};

/// Console configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Log buffer capacity
    pub max_log_entries: usize,
    /// Lifetime of new log entries (seconds)
    pub log_lifetime: f32,
    /// Command history capacity
    pub max_history: usize,
    /// Log rows shown when visible
    pub visible_lines: usize,
    /// Whether log entries keep expiring while the console is hidden
    pub expire_while_hidden: bool,
    /// Forward every entry to the `log` facade
    pub mirror_to_log: bool,
    /// Overlay top-left corner (pixels)
    pub overlay_position: [f32; 2],
    /// Row spacing (pixels)
    pub line_height: f32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            max_log_entries: 500,
            log_lifetime: 10.0,
            max_history: 50,
            visible_lines: 20,
            expire_while_hidden: true,
            mirror_to_log: true,
            overlay_position: [10.0, 300.0],
            line_height: 16.0,
        }
    }
}

/// Outcome of [`Console::execute_command`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionStatus {
    /// Empty line, or console not initialized
    Ignored,
    /// Handler ran and succeeded
    Executed,
    /// No binding for the command name
    Unknown,
    /// Handler returned an error or panicked
    Failed,
}

/// The command console
#[derive(Debug)]
pub struct Console {
    config: ConsoleConfig,
    initialized: bool,
    visible: bool,
    log: LogBuffer,
    history: History,
    commands: CommandRegistry,
    /// Display filter, indexed by `LogLevel::index`
    level_filters: [bool; 4],
    /// Current input line
    input: String,
    /// Rows scrolled up from the newest entry
    scroll_offset: usize,
    quit_requested: bool,
}

impl Console {
    /// Create an uninitialized console with default configuration
    pub fn new() -> Self {
        Self::with_config(ConsoleConfig::default())
    }

    /// Create an uninitialized console with custom configuration
    pub fn with_config(config: ConsoleConfig) -> Self {
        Self {
            log: LogBuffer::new(config.max_log_entries),
            history: History::new(config.max_history),
            config,
            initialized: false,
            visible: false,
            commands: CommandRegistry::new(),
            level_filters: [false, true, true, true],
            input: String::new(),
            scroll_offset: 0,
            quit_requested: false,
        }
    }

    /// Apply capacities and filters and register the built-in commands.
    /// No-op if already initialized.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        self.log.set_max_entries(self.config.max_log_entries);
        self.history.set_max_entries(self.config.max_history);
        self.level_filters = [false, true, true, true];

        for builtin in Builtin::ALL {
            self.commands.register(
                builtin.name(),
                CommandBinding {
                    description: builtin.description().to_string(),
                    kind: CommandKind::Builtin(builtin),
                },
            );
        }

        self.initialized = true;
        log::debug!("Console initialized with {} commands", self.commands.len());
    }

    /// Drop log, history and commands and return to the uninitialized state
    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }

        self.log.clear();
        self.history.clear();
        self.commands.clear();
        self.input.clear();
        self.scroll_offset = 0;
        self.quit_requested = false;
        self.visible = false;
        self.initialized = false;
        log::debug!("Console shut down");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    // --- Visibility ---

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    // --- Logging ---

    /// Append a log entry with the configured lifetime
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        if !self.initialized {
            return;
        }

        let entry = LogEntry::new(level, message, self.config.log_lifetime);
        if self.config.mirror_to_log {
            log::log!(target: "console", level.as_log_level(), "{}", entry.message());
        }
        self.log.push(entry);
    }

    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn log_warning(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn log_error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    pub fn log_debug(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    /// Every stored entry in insertion order, regardless of filters
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.log.iter()
    }

    /// Stored entries whose level is currently shown
    pub fn visible_entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.log
            .iter()
            .filter(move |e| self.is_log_level_enabled(e.level()))
    }

    pub fn log_buffer(&self) -> &LogBuffer {
        &self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
        self.scroll_offset = 0;
    }

    pub fn set_max_log_entries(&mut self, max_entries: usize) {
        self.config.max_log_entries = max_entries;
        self.log.set_max_entries(max_entries);
    }

    /// Lifetime (seconds) applied to entries logged from now on
    pub fn set_log_lifetime(&mut self, seconds: f32) {
        self.config.log_lifetime = seconds;
    }

    /// Show or hide a level. Hidden entries are still stored and expire.
    pub fn set_log_filter(&mut self, level: LogLevel, enabled: bool) {
        self.level_filters[level.index()] = enabled;
        self.clamp_scroll();
    }

    pub fn is_log_level_enabled(&self, level: LogLevel) -> bool {
        self.level_filters[level.index()]
    }

    /// Age log entries by `delta_time` seconds and drop expired ones
    pub fn update(&mut self, delta_time: f32) {
        if !self.initialized || (!self.visible && !self.config.expire_while_hidden) {
            return;
        }

        if self.log.update(delta_time) > 0 {
            self.clamp_scroll();
        }
    }

    // --- Commands ---

    /// Bind a handler to a command name, replacing any previous binding
    pub fn register_command<F>(&mut self, name: impl Into<String>, description: impl Into<String>, handler: F)
    where
        F: Fn(&mut Console, &[String]) -> CommandResult + Send + Sync + 'static,
    {
        let handler: CommandFn = Arc::new(handler);
        self.commands.register(
            name,
            CommandBinding {
                description: description.into(),
                kind: CommandKind::Handler(handler),
            },
        );
    }

    /// Remove a command binding. Returns whether it existed.
    pub fn unregister_command(&mut self, name: &str) -> bool {
        self.commands.unregister(name)
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.commands.contains(name)
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    /// Run one command line. Never fails; problems become Error log lines.
    pub fn execute_command(&mut self, line: &str) -> ExecutionStatus {
        let line = line.trim();
        if !self.initialized || line.is_empty() {
            return ExecutionStatus::Ignored;
        }

        self.history.add(line);

        let tokens = tokenize(line);
        let Some((&name, rest)) = tokens.split_first() else {
            return ExecutionStatus::Ignored;
        };
        let args: Vec<String> = rest.iter().map(|s| s.to_string()).collect();

        let Some(kind) = self.commands.get(name).map(|b| b.kind.clone()) else {
            log::debug!("Unknown console command '{}'", name);
            self.log_error(format!("Unknown command: {}", name));
            return ExecutionStatus::Unknown;
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| match &kind {
            CommandKind::Builtin(builtin) => builtins::run(self, *builtin, &args),
            CommandKind::Handler(handler) => handler.as_ref()(self, &args),
        }));

        match outcome {
            Ok(Ok(())) => ExecutionStatus::Executed,
            Ok(Err(e)) => {
                self.log_error(format!("Command '{}' failed: {}", name, e));
                ExecutionStatus::Failed
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                log::error!("Console command '{}' panicked: {}", name, message);
                self.log_error(format!("Command '{}' panicked: {}", name, message));
                ExecutionStatus::Failed
            }
        }
    }

    /// Registered names starting with `partial`, sorted
    pub fn get_command_suggestions(&self, partial: &str) -> Vec<String> {
        self.commands.suggestions(partial)
    }

    /// The sole matching name, or `partial` unchanged
    pub fn complete_command(&self, partial: &str) -> String {
        self.commands.complete(partial)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn set_max_history(&mut self, max_history: usize) {
        self.config.max_history = max_history;
        self.history.set_max_entries(max_history);
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn clear_quit_request(&mut self) {
        self.quit_requested = false;
    }

    // --- Input line ---

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.history.reset_navigation();
    }

    /// Execute the input line and clear it
    pub fn submit_input(&mut self) -> ExecutionStatus {
        let line = std::mem::take(&mut self.input);
        self.scroll_to_bottom();
        self.execute_command(&line)
    }

    /// Autocomplete the command name in the input line
    pub fn complete_input(&mut self) {
        if self.input.contains(char::is_whitespace) {
            return;
        }
        self.input = self.complete_command(&self.input);
    }

    /// Replace the input with the previous history line
    pub fn history_up(&mut self) {
        if let Some(line) = self.history.older(&self.input) {
            self.input = line.to_string();
        }
    }

    /// Replace the input with the next history line (or the saved input)
    pub fn history_down(&mut self) {
        if let Some(line) = self.history.newer() {
            self.input = line;
        }
    }

    // --- Scrolling ---

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(rows);
        self.clamp_scroll();
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    fn clamp_scroll(&mut self) {
        let max = self
            .visible_entries()
            .count()
            .saturating_sub(self.config.visible_lines);
        self.scroll_offset = self.scroll_offset.min(max);
    }

    // --- Rendering ---

    /// Draw the visible log window and input line. No-op while hidden.
    pub fn render(&self, renderer: &mut dyn DebugRenderer) {
        if !self.initialized || !self.visible {
            return;
        }

        let shown: Vec<&LogEntry> = self.visible_entries().collect();
        let end = shown.len().saturating_sub(self.scroll_offset);
        let start = end.saturating_sub(self.config.visible_lines);

        let origin = Vec2::from(self.config.overlay_position);
        let row = |i: usize| origin + Vec2::new(0.0, i as f32 * self.config.line_height);

        for (i, entry) in shown[start..end].iter().enumerate() {
            renderer.draw_text(&entry.format(), row(i), entry.level().color());
        }

        renderer.draw_text(&format!("> {}", self.input), row(end - start), Color::WHITE);
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
