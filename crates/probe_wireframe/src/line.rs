use glam::Vec3;
use probe_core::Color;
use serde::{Deserialize, Serialize};

/// One accumulated debug segment
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireframeLine {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Color,
}

impl WireframeLine {
    pub fn new(start: Vec3, end: Vec3, color: Color) -> Self {
        Self { start, end, color }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Zero-length segment
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}
