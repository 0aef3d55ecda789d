//! Probe demo
//!
//! Drives a handful of simulated frames through a [`DebugContext`] and
//! prints what would be drawn through the `log` facade.
//!
//! Run with: RUST_LOG=debug cargo run -p probe_runtime --bin probe_demo

use std::thread;
use std::time::Duration;

use glam::{Vec2, Vec3};
use probe_core::{Collider, Color, DebugRenderer, LineStyle, SceneObject};
use probe_runtime::DebugContext;

const FRAMES: u32 = 10;
const FRAME_TIME: Duration = Duration::from_millis(16);

/// Renderer that logs every submission
#[derive(Default)]
struct LogRenderer {
    lines: usize,
}

impl DebugRenderer for LogRenderer {
    fn draw_line(&mut self, start: Vec3, end: Vec3, _color: Color, style: &LineStyle) {
        self.lines += 1;
        log::trace!("line {:?} -> {:?} (width {})", start, end, style.width);
    }

    fn draw_text(&mut self, text: &str, position: Vec2, _color: Color) {
        log::info!("[{:>4.0},{:>4.0}] {}", position.x, position.y, text);
    }
}

struct Crate {
    position: Vec3,
}

impl SceneObject for Crate {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn collider(&self) -> Option<Collider> {
        Some(Collider::Box {
            half_extents: Vec3::splat(0.5),
        })
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut debug = DebugContext::new();
    debug.initialize();
    debug.console_mut().show();

    let crates: Vec<Crate> = (0..3)
        .map(|i| Crate {
            position: Vec3::new(i as f32 * 2.0, 0.0, 0.0),
        })
        .collect();

    for frame in 0..FRAMES {
        debug.begin_frame();

        {
            let profiler = debug.profiler().clone();
            let _frame = profiler.scope("frame");

            {
                let _update = profiler.scope("update");
                thread::sleep(FRAME_TIME / 2);
            }

            let _draw = profiler.scope("debug_draw");
            let mut wireframe = debug.wireframe();
            wireframe.clear();
            wireframe.add_axes(Vec3::ZERO, 1.0);
            wireframe.add_sphere(Vec3::new(0.0, 3.0, 0.0), 1.0, Color::CYAN);
            for object in &crates {
                wireframe.add_entity_wireframe(object, Color::GREEN);
            }
        }

        if frame == FRAMES / 2 {
            debug.console_mut().log_warning("Halfway there");
            debug.console_mut().execute_command("profiler mode detailed");
        }

        thread::sleep(FRAME_TIME / 2);
        debug.end_frame(FRAME_TIME.as_secs_f32());
    }

    let console = debug.console_mut();
    console.execute_command("fps");
    console.execute_command("bogus");

    let export = std::env::temp_dir().join("probe_demo_profile.json");
    console.execute_command(&format!("profiler export json {}", export.display()));

    let mut renderer = LogRenderer::default();
    debug.render(&mut renderer);
    log::info!("Submitted {} debug lines", renderer.lines);

    debug.shutdown();
}
