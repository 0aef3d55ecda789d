//! Profiler overlay
//!
//! The display mode only selects which slice of the aggregate table is
//! rendered; it never changes the recorded data.

use probe_core::{DebugRenderer, LineStyle, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::Profiler;

/// Overlay display mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayMode {
    /// FPS plus average time per span
    #[default]
    Simple,
    /// Full statistics table
    Detailed,
    /// FPS summary plus a frame-time graph
    Graph,
}

impl DisplayMode {
    /// Next mode in Simple -> Detailed -> Graph order
    pub fn next(self) -> Self {
        match self {
            Self::Simple => Self::Detailed,
            Self::Detailed => Self::Graph,
            Self::Graph => Self::Simple,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Detailed => "detailed",
            Self::Graph => "graph",
        }
    }

    /// Parse a mode name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "simple" => Some(Self::Simple),
            "detailed" => Some(Self::Detailed),
            "graph" => Some(Self::Graph),
            _ => None,
        }
    }
}

impl Profiler {
    /// Advance to the next display mode
    pub fn cycle_display_mode(&mut self) -> DisplayMode {
        let mode = self.display_mode().next();
        self.set_display_mode(mode);
        mode
    }

    /// Text lines for the current display mode
    pub fn display_lines(&self) -> Vec<String> {
        let history = self.frame_history();
        let mut lines = vec![format!(
            "FPS: {:.1} ({:.2} ms)",
            self.average_fps(),
            history.average_frame_time()
        )];

        match self.display_mode() {
            DisplayMode::Simple => {
                for sample in self.samples() {
                    lines.push(format!("{}: {:.3} ms", sample.name, sample.average_time));
                }
            }
            DisplayMode::Detailed => {
                lines.push(format!(
                    "{:<24} {:>9} {:>9} {:>9} {:>7} {:>9}",
                    "Name", "Avg", "Min", "Max", "Calls", "Last"
                ));
                for sample in self.samples() {
                    lines.push(format!(
                        "{:<24} {:>9.3} {:>9.3} {:>9.3} {:>7} {:>9.3}",
                        sample.name,
                        sample.average_time,
                        sample.min_time,
                        sample.max_time,
                        sample.call_count,
                        sample.last_time,
                    ));
                }
            }
            DisplayMode::Graph => {
                lines.push(format!(
                    "Frame time min {:.2} / max {:.2} ms, 1% low {:.1} FPS",
                    history.min_frame_time(),
                    history.max_frame_time(),
                    history.one_percent_low_fps()
                ));
            }
        }

        lines
    }

    /// Hand the overlay to the renderer. No-op when not recording.
    pub fn render(&self, renderer: &mut dyn DebugRenderer) {
        if !self.is_recording() {
            return;
        }

        let config = self.config();
        let origin = Vec2::from(config.overlay_position);
        let lines = self.display_lines();

        for (i, line) in lines.iter().enumerate() {
            let position = origin + Vec2::new(0.0, i as f32 * config.line_height);
            renderer.draw_text(line, position, config.text_color);
        }

        if self.display_mode() == DisplayMode::Graph {
            let top = origin.y + (lines.len() as f32 + 0.5) * config.line_height;
            self.render_graph(renderer, Vec2::new(origin.x, top));
        }
    }

    /// Frame-time polyline, newest frame on the right, taller = slower
    fn render_graph(&self, renderer: &mut dyn DebugRenderer, top_left: Vec2) {
        let history = self.frame_history();
        if history.len() < 2 {
            return;
        }

        let config = self.config();
        let [width, height] = config.graph_size;
        let scale = history.max_frame_time().max(f64::EPSILON);
        let step = width / (history.capacity().max(2) - 1) as f32;
        let bottom = top_left.y + height;

        let points: Vec<Vec3> = history
            .iter()
            .enumerate()
            .map(|(i, ms)| {
                let x = top_left.x + i as f32 * step;
                let y = bottom - (ms / scale) as f32 * height;
                Vec3::new(x, y, 0.0)
            })
            .collect();

        for pair in points.windows(2) {
            renderer.draw_line(pair[0], pair[1], config.graph_color, &LineStyle::OVERLAY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use probe_core::{DrawCommand, RecordingRenderer};

    fn profiler() -> Profiler {
        let mut profiler = Profiler::new();
        profiler.initialize();
        profiler.update_profile_data("physics", 1.5);
        profiler.update_profile_data("render", 3.0);
        profiler
    }

    #[test]
    fn test_mode_cycle_and_names() {
        let mut mode = DisplayMode::Simple;
        mode = mode.next();
        assert_eq!(mode, DisplayMode::Detailed);
        mode = mode.next();
        assert_eq!(mode, DisplayMode::Graph);
        assert_eq!(mode.next(), DisplayMode::Simple);

        assert_eq!(DisplayMode::from_name("Detailed"), Some(DisplayMode::Detailed));
        assert_eq!(DisplayMode::from_name("bogus"), None);
        assert_eq!(DisplayMode::Graph.name(), "graph");
    }

    #[test]
    fn test_simple_lines() {
        let lines = profiler().display_lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("FPS:"));
        assert_eq!(lines[1], "physics: 1.500 ms");
    }

    #[test]
    fn test_detailed_lines_have_header() {
        let mut profiler = profiler();
        profiler.set_display_mode(DisplayMode::Detailed);

        let lines = profiler.display_lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("Name"));
        assert!(lines[3].starts_with("render"));
    }

    #[test]
    fn test_mode_does_not_alter_data() {
        let mut profiler = profiler();
        let before = profiler.report();
        profiler.cycle_display_mode();
        profiler.cycle_display_mode();
        assert_eq!(profiler.report(), before);
    }

    #[test]
    fn test_render_graph_lines() {
        let mut profiler = profiler();
        profiler.set_display_mode(DisplayMode::Graph);
        for ms in [16.0, 17.0, 33.0, 16.0] {
            profiler.update(ms / 1000.0);
        }

        let mut renderer = RecordingRenderer::new();
        profiler.render(&mut renderer);

        assert_eq!(renderer.texts().len(), 2);
        assert_eq!(renderer.line_count(), 3);
        assert!(renderer.commands().iter().all(|c| match c {
            DrawCommand::Line { style, .. } => !style.depth_test,
            DrawCommand::Text { .. } => true,
        }));
    }

    #[test]
    fn test_render_disabled_is_noop() {
        let mut profiler = profiler();
        profiler.set_enabled(false);

        let mut renderer = RecordingRenderer::new();
        profiler.render(&mut renderer);
        assert!(renderer.commands().is_empty());
    }
}
