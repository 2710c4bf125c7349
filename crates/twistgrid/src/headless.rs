use std::collections::BTreeMap;

use cgmath::{Point2, Rad, SquareMatrix};
use twistgrid_core::{Axis, Float, Matrix3, ObjectId, ObjectSpawn, Vector3};
use twistgrid_view::{HostServices, RayHit};

/// Transform of one object as seen by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub grid: [u16; 3],
    pub position: Vector3,
    pub orientation: Matrix3,
}

/// Host with no display. It never reports pointer hits, and projects with an
/// orthographic camera looking down −Z.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    pub objects: BTreeMap<ObjectId, Transform>,
}

impl HostServices for HeadlessHost {
    fn cast_ray(&mut self, _point: Point2<Float>) -> Option<RayHit> {
        None
    }

    fn project(&self, point: Vector3) -> Point2<Float> {
        Point2::new(point.x, -point.y)
    }

    fn rotate_object(&mut self, id: ObjectId, axis: Axis, radians: Float, pivot: Vector3) {
        let Some(obj) = self.objects.get_mut(&id) else {
            log::warn!("rotating unknown object {id}");
            return;
        };
        let rot = Matrix3::from_axis_angle(axis.unit_vector(), Rad(radians));
        obj.position = rot * (obj.position - pivot) + pivot;
        obj.orientation = rot * obj.orientation;
    }

    fn sync_object(&mut self, id: ObjectId, position: Vector3, orientation: Matrix3) {
        if let Some(obj) = self.objects.get_mut(&id) {
            obj.position = position;
            obj.orientation = orientation;
        }
    }

    fn on_objects_added(&mut self, spawns: &[ObjectSpawn]) {
        for spawn in spawns {
            self.objects.insert(
                spawn.id,
                Transform {
                    grid: spawn.grid,
                    position: spawn.position,
                    orientation: Matrix3::identity(),
                },
            );
        }
    }

    fn on_destroy(&mut self, ids: &[ObjectId]) {
        for id in ids {
            self.objects.remove(id);
        }
    }
}
