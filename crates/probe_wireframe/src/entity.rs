//! Scene-object outlines

use probe_core::{Collider, Color, SceneObject};

use crate::Wireframe;

impl Wireframe {
    /// Outline a scene object's collider at its world pose.
    ///
    /// Box colliders become a box of `half_extents * 2 * scale`; circle
    /// colliders become a circle whose radius is scaled by the larger of
    /// the X/Y scale. Objects without a collider draw nothing.
    pub fn add_entity_wireframe(&mut self, object: &dyn SceneObject, color: Color) {
        let Some(collider) = object.collider() else {
            return;
        };

        let position = object.position();
        let scale = object.scale();

        match collider {
            Collider::Box { half_extents } => {
                self.add_box(position, half_extents * 2.0 * scale, color);
            }
            Collider::Circle { radius } => {
                self.add_circle(position, radius * scale.x.max(scale.y), color);
            }
        }
    }

    /// Outline every object in `objects`
    pub fn add_entity_wireframes<'a, I>(&mut self, objects: I, color: Color)
    where
        I: IntoIterator<Item = &'a dyn SceneObject>,
    {
        for object in objects {
            self.add_entity_wireframe(object, color);
        }
    }
}
