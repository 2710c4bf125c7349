//! Conversion of pointer drags into layer rotations.

use cgmath::{InnerSpace, Point2, Vector2};
use twistgrid_core::{Axis, Float, Layer, ObjectId, Vector3};

use crate::HostServices;

/// Distance along the third axis used to probe the screen-space direction of
/// a drag.
const DIRECTION_PROBE_DISTANCE: Float = 2.0;

/// Object grabbed by the pointer, before the drag has picked an axis.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Grab {
    /// Object under the pointer.
    pub object: ObjectId,
    /// Axis of the face that was clicked.
    pub fixed: Axis,
    /// Whether the clicked face points along the positive axis.
    pub positive: bool,
    /// World-space point where the face was clicked.
    pub hit_point: Vector3,
    /// Screen point where the grab started.
    pub start: Point2<Float>,
    /// Last screen point that was accepted.
    pub prev: Point2<Float>,
}

/// Drag that has committed to a layer.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Drag {
    /// Layer being rotated.
    pub layer: Layer,
    /// Objects in the layer when the drag started.
    pub members: Vec<ObjectId>,
    /// Unit screen-space direction that corresponds to a positive rotation,
    /// or zero if it could not be determined.
    pub direction: Vector2<Float>,
    /// Last screen point that was accepted.
    pub prev: Point2<Float>,
    /// Total angle that the layer has been rotated so far.
    pub total: Float,
}

/// Returns the axis of a face normal and whether it points in the positive
/// direction, or `None` if no component rounds to a nonzero value.
pub(crate) fn fixed_normal(normal: Vector3) -> Option<(Axis, bool)> {
    Axis::iter().find_map(|axis| {
        let c = axis.component(normal).round();
        (c != 0.0).then_some((axis, c > 0.0))
    })
}

/// Picks the rotation axis for a drag across a face perpendicular to `fixed`,
/// given the world-space displacement of the pointer along the face.
///
/// The layer rotates around whichever in-face axis the pointer moved least
/// along.
pub(crate) fn rotation_axis(fixed: Axis, displacement: Vector3) -> Axis {
    let [a, b] = fixed.others();
    let da = a.component(displacement).abs();
    let db = b.component(displacement).abs();
    if db > da { a } else { b }
}

/// Returns the unit screen-space direction in which the pointer must move to
/// rotate the layer around `axis` in the positive direction.
pub(crate) fn drag_direction(host: &impl HostServices, grab: &Grab, axis: Axis) -> Vector2<Float> {
    let Some(third) = grab.fixed.third(axis) else {
        return Vector2::new(0.0, 0.0);
    };
    let mut offset = if grab.positive {
        DIRECTION_PROBE_DISTANCE
    } else {
        -DIRECTION_PROBE_DISTANCE
    };
    if axis == grab.fixed.next() {
        offset = -offset;
    }
    let mut probe = grab.hit_point;
    *third.component_mut(&mut probe) += offset;

    let v = host.project(probe) - grab.start;
    if v.magnitude2() == 0.0 || !v.magnitude2().is_finite() {
        return Vector2::new(0.0, 0.0);
    }
    v.normalize()
}

/// Returns whether the pointer has moved far enough from `prev` to count.
pub(crate) fn exceeds_threshold(prev: Point2<Float>, point: Point2<Float>, threshold_sq: Float) -> bool {
    (point - prev).magnitude2() >= threshold_sq
}
