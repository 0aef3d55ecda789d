//! Scene-object collaborator interface
//!
//! The wireframe service can outline scene objects without knowing anything
//! about the host's scene graph. The host implements [`SceneObject`] for
//! whatever entity type it has.

use glam::Vec3;

/// Collision shape exposed by a scene object
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Collider {
    /// Axis-aligned box with the given half extents (local space)
    Box { half_extents: Vec3 },
    /// Circle/sphere collider with the given radius (local space)
    Circle { radius: f32 },
}

/// Read-only view of a scene object's pose and optional collider
pub trait SceneObject {
    /// World-space position
    fn position(&self) -> Vec3;

    /// Per-axis scale
    fn scale(&self) -> Vec3 {
        Vec3::ONE
    }

    /// Collision shape, if the object has one
    fn collider(&self) -> Option<Collider> {
        None
    }
}
