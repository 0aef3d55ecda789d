//! # probe_runtime - Debug Context
//!
//! Owns one profiler, one console and one wireframe service for the
//! lifetime of the host application and wires them together:
//!
//! ```text
//! begin_frame ──► (host work: spans, console logging, debug shapes) ──► end_frame(dt)
//!                                                                          │
//!                     render(renderer): wireframe ─► profiler ─► console ◄─┘
//! ```
//!
//! The context is constructed explicitly and passed to whatever needs it;
//! there is no global instance. The profiler and wireframe are held behind
//! shared handles so console commands and worker threads can reach them.

pub mod commands;

pub use commands::register_debug_commands;

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use probe_console::{Console, ConsoleConfig};
use probe_core::DebugRenderer;
use probe_profiler::{Profiler, ProfilerConfig, SharedProfiler};
use probe_wireframe::{Wireframe, WireframeConfig};
use serde::{Deserialize, Serialize};

/// Lock-protected wireframe shared with console commands
pub type SharedWireframe = Arc<Mutex<Wireframe>>;

/// Configuration for all debug services
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub profiler: ProfilerConfig,
    pub console: ConsoleConfig,
    pub wireframe: WireframeConfig,
    /// Register the `profiler`, `fps` and `wireframe` console commands
    pub register_commands: bool,
}

impl DebugConfig {
    /// Default service configs with the control commands registered
    pub fn with_commands() -> Self {
        Self {
            register_commands: true,
            ..Default::default()
        }
    }
}

/// Application-level owner of the debug services
pub struct DebugContext {
    profiler: SharedProfiler,
    console: Console,
    wireframe: SharedWireframe,
    register_commands: bool,
    initialized: bool,
}

impl DebugContext {
    pub fn new() -> Self {
        Self::with_config(DebugConfig::with_commands())
    }

    pub fn with_config(config: DebugConfig) -> Self {
        Self {
            profiler: SharedProfiler::new(Profiler::with_config(config.profiler)),
            console: Console::with_config(config.console),
            wireframe: Arc::new(Mutex::new(Wireframe::with_config(config.wireframe))),
            register_commands: config.register_commands,
            initialized: false,
        }
    }

    /// Initialize every service. Idempotent.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        self.profiler.lock().initialize();
        self.console.initialize();
        self.wireframe.lock().initialize();

        if self.register_commands {
            register_debug_commands(&mut self.console, &self.profiler, &self.wireframe);
        }

        self.initialized = true;
        log::info!("Debug context initialized");
    }

    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }

        self.wireframe.lock().shutdown();
        self.console.shutdown();
        self.profiler.lock().shutdown();

        self.initialized = false;
        log::info!("Debug context shut down");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn profiler(&self) -> &SharedProfiler {
        &self.profiler
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    /// Lock the wireframe for drawing
    pub fn wireframe(&self) -> MutexGuard<'_, Wireframe> {
        self.wireframe.lock()
    }

    /// Cloneable wireframe handle
    pub fn wireframe_handle(&self) -> SharedWireframe {
        Arc::clone(&self.wireframe)
    }

    // ========== Frame ==========

    pub fn begin_frame(&mut self) {
        self.profiler.lock().on_frame_start();
    }

    /// Close the frame: record its wall-clock time and age the console log
    /// by `delta_time` seconds.
    pub fn end_frame(&mut self, delta_time: f32) {
        self.profiler.lock().on_frame_end();
        self.console.update(delta_time);
    }

    /// Hand every service's state to the renderer
    pub fn render(&self, renderer: &mut dyn DebugRenderer) {
        self.wireframe.lock().render(renderer);
        self.profiler.lock().render(renderer);
        self.console.render(renderer);
    }
}

impl Default for DebugContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DebugContext {
    fn drop(&mut self) {
        self.shutdown();
    }
}
