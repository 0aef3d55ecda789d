//! Parametric tessellation
//!
//! Pure functions producing `(start, end)` segment pairs. Degenerate input
//! (zero or negative sizes, zero segment counts) yields degenerate or empty
//! geometry, never a fault.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// The 12 edges of an axis-aligned box centered on `center`
pub fn box_edges(center: Vec3, size: Vec3) -> [(Vec3, Vec3); 12] {
    let h = size * 0.5;
    let corner = |x: f32, y: f32, z: f32| center + Vec3::new(x * h.x, y * h.y, z * h.z);

    // Bottom face (y = -h), then top face (y = +h), counter-clockwise
    let c = [
        corner(-1.0, -1.0, -1.0),
        corner(1.0, -1.0, -1.0),
        corner(1.0, -1.0, 1.0),
        corner(-1.0, -1.0, 1.0),
        corner(-1.0, 1.0, -1.0),
        corner(1.0, 1.0, -1.0),
        corner(1.0, 1.0, 1.0),
        corner(-1.0, 1.0, 1.0),
    ];

    [
        (c[0], c[1]),
        (c[1], c[2]),
        (c[2], c[3]),
        (c[3], c[0]),
        (c[4], c[5]),
        (c[5], c[6]),
        (c[6], c[7]),
        (c[7], c[4]),
        (c[0], c[4]),
        (c[1], c[5]),
        (c[2], c[6]),
        (c[3], c[7]),
    ]
}

/// Closed loop of `segments` lines in the XY plane
pub fn circle_segments(center: Vec3, radius: f32, segments: u32) -> Vec<(Vec3, Vec3)> {
    let point = |i: u32| {
        let angle = TAU * i as f32 / segments as f32;
        center + Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
    };

    (0..segments).map(|i| (point(i), point((i + 1) % segments))).collect()
}

/// UV-sphere wireframe: `rings` latitude rings of `segments` lines each,
/// plus `segments` meridians of `rings - 1` lines each.
///
/// Rings are evenly spaced strictly between the poles (+Y first), so no
/// ring collapses to a point.
pub fn sphere_segments(center: Vec3, radius: f32, rings: u32, segments: u32) -> Vec<(Vec3, Vec3)> {
    if rings == 0 || segments == 0 {
        return Vec::new();
    }

    let point = |ring: u32, seg: u32| {
        let phi = PI * (ring + 1) as f32 / (rings + 1) as f32;
        let theta = TAU * seg as f32 / segments as f32;
        let ring_radius = radius * phi.sin();
        center
            + Vec3::new(
                ring_radius * theta.cos(),
                radius * phi.cos(),
                ring_radius * theta.sin(),
            )
    };

    let mut lines = Vec::with_capacity((rings * segments + segments * (rings - 1)) as usize);

    for ring in 0..rings {
        for seg in 0..segments {
            lines.push((point(ring, seg), point(ring, (seg + 1) % segments)));
        }
    }

    for seg in 0..segments {
        for ring in 0..rings - 1 {
            lines.push((point(ring, seg), point(ring + 1, seg)));
        }
    }

    lines
}

/// Y-axis cylinder: top and bottom rings of `segments` lines plus
/// `segments` vertical struts.
pub fn cylinder_segments(center: Vec3, radius: f32, height: f32, segments: u32) -> Vec<(Vec3, Vec3)> {
    let half = height * 0.5;
    let point = |i: u32, y: f32| {
        let angle = TAU * i as f32 / segments as f32;
        center + Vec3::new(radius * angle.cos(), y, radius * angle.sin())
    };

    let mut lines = Vec::with_capacity(segments as usize * 3);
    for i in 0..segments {
        let next = (i + 1) % segments;
        lines.push((point(i, half), point(next, half)));
        lines.push((point(i, -half), point(next, -half)));
        lines.push((point(i, half), point(i, -half)));
    }
    lines
}
