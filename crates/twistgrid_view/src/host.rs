use cgmath::Point2;
use twistgrid_core::{Axis, Float, Matrix3, ObjectId, ObjectSpawn, Vector3};

/// Result of casting a ray from a screen point into the scene.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RayHit {
    /// Object that the ray hit first.
    pub object: ObjectId,
    /// World-space intersection point.
    pub point: Vector3,
    /// World-space normal of the face that was hit.
    pub normal: Vector3,
}

/// Scene operations that the engine needs from the host.
///
/// All points in screen space are in the same units as the pointer positions
/// passed to the engine.
pub trait HostServices {
    /// Returns the nearest object under a screen point, or `None` if there is
    /// none.
    fn cast_ray(&mut self, point: Point2<Float>) -> Option<RayHit>;
    /// Projects a world-space point to screen space.
    fn project(&self, point: Vector3) -> Point2<Float>;
    /// Rotates an object by `radians` around the line through `pivot`
    /// parallel to `axis`. Positive angles are counterclockwise when viewed
    /// from the positive end of the axis.
    fn rotate_object(&mut self, id: ObjectId, axis: Axis, radians: Float, pivot: Vector3);

    /// Overwrites an object's transform. Called after objects are snapped
    /// onto the lattice and after a reset.
    fn sync_object(&mut self, id: ObjectId, position: Vector3, orientation: Matrix3) {
        let _ = (id, position, orientation);
    }

    /// Called once with every object when the engine is constructed.
    fn on_objects_added(&mut self, spawns: &[ObjectSpawn]) {
        let _ = spawns;
    }
    /// Called when the user grabs an object. Hosts typically disable camera
    /// controls here.
    fn on_interact_start(&mut self) {}
    /// Called when the user releases a grabbed object.
    fn on_interact_end(&mut self) {}
    /// Called with every object when the engine is destroyed.
    fn on_destroy(&mut self, ids: &[ObjectId]) {
        let _ = ids;
    }
}
