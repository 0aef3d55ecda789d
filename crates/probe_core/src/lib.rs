//! # probe_core - Debug Instrumentation Primitives
//!
//! Types shared by the profiler, console and wireframe services:
//! - [`Color`] for RGBA line and text colors
//! - [`DebugRenderer`], the opaque sink every service hands its output to
//! - [`SceneObject`], the geometry-query collaborator used for entity wireframes
//!
//! None of the services touch pixels or graphics-API state. They only ever
//! talk to a [`DebugRenderer`] at render time.

pub mod color;
pub mod renderer;
pub mod scene;

pub use color::Color;
pub use renderer::{DebugRenderer, DrawCommand, LineStyle, RecordingRenderer};
pub use scene::{Collider, SceneObject};

pub use glam::{Vec2, Vec3};
