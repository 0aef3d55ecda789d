//! Renderer collaborator interface
//!
//! The instrumentation services never draw anything themselves. At render
//! time they hand colored line segments and text to a [`DebugRenderer`],
//! which is owned by the host application.
//!
//! # Example
//!
//! ```ignore
//! use probe_core::{Color, DebugRenderer, LineStyle, RecordingRenderer, Vec2, Vec3};
//!
//! let mut renderer = RecordingRenderer::new();
//! renderer.draw_line(Vec3::ZERO, Vec3::X, Color::RED, &LineStyle::default());
//! renderer.draw_text("FPS: 60.0", Vec2::new(10.0, 10.0), Color::WHITE);
//! assert_eq!(renderer.line_count(), 1);
//! ```

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Rendering hints attached to debug lines.
///
/// These are passed through to the renderer untouched; they never change
/// the submitted geometry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Line width (pixels)
    pub width: f32,
    /// Whether lines are occluded by scene depth
    pub depth_test: bool,
    /// Whether back-facing segments may be culled
    pub culling: bool,
}

impl LineStyle {
    /// Style for screen-space overlays (graphs, panels)
    pub const OVERLAY: Self = Self {
        width: 1.0,
        depth_test: false,
        culling: false,
    };
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            depth_test: true,
            culling: false,
        }
    }
}

/// Sink for debug geometry and text.
///
/// Implementations cannot fail observably; a renderer that drops a call on
/// the floor is still a valid renderer.
pub trait DebugRenderer {
    /// Draw one colored line segment
    fn draw_line(&mut self, start: Vec3, end: Vec3, color: Color, style: &LineStyle);

    /// Draw a line of text at a screen-space position (pixels, top-left origin)
    fn draw_text(&mut self, text: &str, position: Vec2, color: Color);
}

/// A single recorded renderer call
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Line {
        start: Vec3,
        end: Vec3,
        color: Color,
        style: LineStyle,
    },
    Text {
        text: String,
        position: Vec2,
        color: Color,
    },
}

/// Renderer that records every call, for headless hosts and inspection
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded commands in submission order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded line segments
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    /// Recorded text lines in submission order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                DrawCommand::Line { .. } => None,
            })
            .collect()
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Take the recorded commands, leaving the recorder empty
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl DebugRenderer for RecordingRenderer {
    fn draw_line(&mut self, start: Vec3, end: Vec3, color: Color, style: &LineStyle) {
        self.commands.push(DrawCommand::Line {
            start,
            end,
            color,
            style: *style,
        });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            color,
        });
    }
}
