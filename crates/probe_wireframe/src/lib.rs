//! # probe_wireframe - Debug-Draw Line Accumulator
//!
//! Collects colored line segments for debug shapes and hands them to the
//! host's [`DebugRenderer`] once per frame:
//! - Raw lines and axis gizmos
//! - Boxes, circles, UV spheres and cylinders by parametric tessellation
//! - Collider outlines for anything implementing [`SceneObject`]
//!
//! Adding geometry is never gated; only [`Wireframe::render`] honors the
//! `enabled` flag. The line list persists until cleared, unless
//! [`WireframeConfig::auto_clear`] is set.
//!
//! [`SceneObject`]: probe_core::SceneObject

pub mod entity;
pub mod line;
pub mod shapes;

pub use line::WireframeLine;

use glam::Vec3;
use probe_core::{Color, DebugRenderer, LineStyle};
use serde::{Deserialize, Serialize};

/// Wireframe configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireframeConfig {
    /// Submit lines on render
    pub enabled: bool,
    /// Line width hint (pixels)
    pub line_width: f32,
    /// Depth-test hint
    pub depth_test: bool,
    /// Back-face culling hint
    pub culling: bool,
    /// Segments per circle
    pub circle_segments: u32,
    /// Latitude rings per sphere (pole to pole)
    pub sphere_rings: u32,
    /// Segments per sphere ring
    pub sphere_segments: u32,
    /// Segments per cylinder cap
    pub cylinder_segments: u32,
    /// Clear the line list after each render
    pub auto_clear: bool,
}

impl Default for WireframeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            line_width: 1.0,
            depth_test: true,
            culling: false,
            circle_segments: 32,
            sphere_rings: 8,
            sphere_segments: 16,
            cylinder_segments: 16,
            auto_clear: false,
        }
    }
}

/// Debug-draw service
#[derive(Debug)]
pub struct Wireframe {
    config: WireframeConfig,
    initialized: bool,
    lines: Vec<WireframeLine>,
}

impl Wireframe {
    pub fn new() -> Self {
        Self::with_config(WireframeConfig::default())
    }

    pub fn with_config(config: WireframeConfig) -> Self {
        Self {
            config,
            initialized: false,
            lines: Vec::new(),
        }
    }

    /// Start with an empty line list. Idempotent.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        self.lines.clear();
        self.initialized = true;
        log::debug!("Wireframe initialized");
    }

    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }

        self.lines.clear();
        self.initialized = false;
        log::debug!("Wireframe shut down");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &WireframeConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.config.line_width = width;
    }

    pub fn set_depth_test(&mut self, depth_test: bool) {
        self.config.depth_test = depth_test;
    }

    pub fn set_culling(&mut self, culling: bool) {
        self.config.culling = culling;
    }

    pub fn set_auto_clear(&mut self, auto_clear: bool) {
        self.config.auto_clear = auto_clear;
    }

    /// Renderer hints derived from the current config
    pub fn line_style(&self) -> LineStyle {
        LineStyle {
            width: self.config.line_width,
            depth_test: self.config.depth_test,
            culling: self.config.culling,
        }
    }

    pub fn lines(&self) -> &[WireframeLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    // ========== Geometry ==========

    /// Append one segment, regardless of `enabled`
    pub fn add_line(&mut self, start: Vec3, end: Vec3, color: Color) {
        self.lines.push(WireframeLine::new(start, end, color));
    }

    /// Axis-aligned box with full extents `size`
    pub fn add_box(&mut self, center: Vec3, size: Vec3, color: Color) {
        for (start, end) in shapes::box_edges(center, size) {
            self.add_line(start, end, color);
        }
    }

    /// Circle in the XY plane
    pub fn add_circle(&mut self, center: Vec3, radius: f32, color: Color) {
        let segments = self.config.circle_segments;
        self.extend(shapes::circle_segments(center, radius, segments), color);
    }

    /// UV sphere: latitude rings plus meridians
    pub fn add_sphere(&mut self, center: Vec3, radius: f32, color: Color) {
        let lines = shapes::sphere_segments(
            center,
            radius,
            self.config.sphere_rings,
            self.config.sphere_segments,
        );
        self.extend(lines, color);
    }

    /// Y-axis cylinder spanning `center.y ± height / 2`
    pub fn add_cylinder(&mut self, center: Vec3, radius: f32, height: f32, color: Color) {
        let segments = self.config.cylinder_segments;
        self.extend(
            shapes::cylinder_segments(center, radius, height, segments),
            color,
        );
    }

    /// X (red), Y (green) and Z (blue) axis gizmo
    pub fn add_axes(&mut self, origin: Vec3, length: f32) {
        self.add_line(origin, origin + Vec3::X * length, Color::RED);
        self.add_line(origin, origin + Vec3::Y * length, Color::GREEN);
        self.add_line(origin, origin + Vec3::Z * length, Color::BLUE);
    }

    fn extend(&mut self, segments: Vec<(Vec3, Vec3)>, color: Color) {
        self.lines.extend(
            segments
                .into_iter()
                .map(|(start, end)| WireframeLine::new(start, end, color)),
        );
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Same as [`Wireframe::clear`]
    pub fn clear_lines(&mut self) {
        self.clear();
    }

    // ========== Rendering ==========

    /// Submit every accumulated line. No-op while disabled.
    pub fn render(&mut self, renderer: &mut dyn DebugRenderer) {
        if !self.config.enabled {
            return;
        }

        let style = self.line_style();
        for line in &self.lines {
            renderer.draw_line(line.start, line.end, line.color, &style);
        }

        if self.config.auto_clear {
            self.lines.clear();
        }
    }
}

impl Default for Wireframe {
    fn default() -> Self {
        Self::new()
    }
}
