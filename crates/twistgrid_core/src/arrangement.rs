use thiserror::Error;

use crate::{Axis, Float, SPACING_FACTOR, Vector3};

/// Error produced when constructing an [`Arrangement`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArrangementError {
    /// An axis has no objects on it.
    #[error("arrangement must have at least one object along the {0} axis")]
    EmptyAxis(Axis),
    /// The object size is zero, negative, or not finite.
    #[error("object size must be a finite positive number; got {0}")]
    BadObjectSize(Float),
    /// There are too many objects to give each one an
    /// [`ObjectId`](crate::ObjectId).
    #[error("arrangement of {0:?} has more than {max} objects", max = u32::MAX)]
    TooManyObjects([u16; 3]),
}

/// Dimensions and placement of a grid of objects.
///
/// Layer indexing follows the negative direction of each axis: layer 0 is the
/// layer with the most positive coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrangement {
    counts: [u16; 3],
    object_size: Float,
    spacing: Float,
    origin: Vector3,
}

impl Arrangement {
    /// Constructs an arrangement of `counts[0] × counts[1] × counts[2]`
    /// objects, each with edge length `object_size`, centered on `origin`.
    pub fn new(counts: [u16; 3], object_size: Float, origin: Vector3) -> Result<Self, ArrangementError> {
        if let Some(axis) = Axis::iter().find(|axis| counts[axis.index()] == 0) {
            return Err(ArrangementError::EmptyAxis(axis));
        }
        if !(object_size.is_finite() && object_size > 0.0) {
            return Err(ArrangementError::BadObjectSize(object_size));
        }
        let object_count: u64 = counts.iter().map(|&n| n as u64).product();
        if object_count > u32::MAX as u64 {
            return Err(ArrangementError::TooManyObjects(counts));
        }
        Ok(Self {
            counts,
            object_size,
            spacing: object_size * SPACING_FACTOR,
            origin,
        })
    }

    /// Constructs an arrangement centered on the world origin.
    pub fn centered(counts: [u16; 3], object_size: Float) -> Result<Self, ArrangementError> {
        Self::new(counts, object_size, Vector3::new(0.0, 0.0, 0.0))
    }

    /// Returns the number of objects along each axis.
    pub fn counts(&self) -> [u16; 3] {
        self.counts
    }
    /// Returns the number of layers along `axis`.
    pub fn count(&self, axis: Axis) -> u16 {
        self.counts[axis.index()]
    }
    /// Returns the total number of objects.
    pub fn object_count(&self) -> usize {
        self.counts.iter().map(|&n| n as usize).product()
    }
    /// Returns the edge length of each object.
    pub fn object_size(&self) -> Float {
        self.object_size
    }
    /// Returns the distance between the centers of neighboring objects.
    pub fn spacing(&self) -> Float {
        self.spacing
    }
    /// Returns the world-space anchor point of the arrangement.
    pub fn origin(&self) -> Vector3 {
        self.origin
    }

    /// Returns whether `index` names a layer along `axis`.
    pub fn contains_layer(&self, axis: Axis, index: u16) -> bool {
        index < self.count(axis)
    }

    /// Returns the nominal coordinate along `axis` of the layer at `index`.
    pub fn layer_coordinate(&self, axis: Axis, index: u16) -> Float {
        let start = (self.count(axis) as Float - 1.0) / 2.0;
        (start - index as Float) * self.spacing + axis.component(self.origin)
    }

    /// Returns the layer index nearest to the world coordinate `coordinate`
    /// along `axis`. The result may be out of range.
    pub fn nearest_layer_index(&self, axis: Axis, coordinate: Float) -> i64 {
        let start = (self.count(axis) as Float - 1.0) / 2.0;
        let divided = (coordinate - axis.component(self.origin)) / self.spacing;
        (start - divided).round() as i64
    }

    /// Returns whether the cross-section perpendicular to `axis` is square.
    ///
    /// Layers with a non-square cross-section only admit half turns.
    pub fn is_square_cross_section(&self, axis: Axis) -> bool {
        let [a, b] = axis.others();
        self.count(a) == self.count(b)
    }

    /// Returns the canonical world position of the object at grid coordinates
    /// `grid`.
    pub fn grid_position(&self, grid: [u16; 3]) -> Vector3 {
        let mut ret = self.origin;
        for axis in Axis::iter() {
            *axis.component_mut(&mut ret) = self.layer_coordinate(axis, grid[axis.index()]);
        }
        ret
    }

    /// Returns the grid coordinates of every object, in creation order: Z is
    /// the outermost loop and X the innermost.
    pub fn grid_coordinates(&self) -> impl Iterator<Item = [u16; 3]> + use<> {
        let [nx, ny, nz] = self.counts;
        itertools::iproduct!(0..nz, 0..ny, 0..nx).map(|(z, y, x)| [x, y, z])
    }

    /// Rounds a position to the nearest point of the half-spacing lattice
    /// around the origin.
    pub fn snap_to_lattice(&self, position: Vector3) -> Vector3 {
        let half = self.spacing / 2.0;
        let relative = position - self.origin;
        let snapped = relative.map(|c| (c / half).round() * half);
        snapped + self.origin
    }

    /// Returns the palette index of each exterior face of the object at
    /// `grid`, in the order +X, −X, +Y, −Y, +Z, −Z. Interior faces are
    /// `None`.
    pub fn exterior_faces(&self, grid: [u16; 3]) -> [Option<usize>; 6] {
        let [x, y, z] = grid;
        let [nx, ny, nz] = self.counts;
        [
            (x == 0).then_some(3),
            (x + 1 == nx).then_some(1),
            (y == 0).then_some(5),
            (y + 1 == ny).then_some(4),
            (z == 0).then_some(2),
            (z + 1 == nz).then_some(0),
        ]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_arrangement_validation() {
        assert_eq!(
            Arrangement::centered([3, 0, 3], 1.0),
            Err(ArrangementError::EmptyAxis(Axis::Y)),
        );
        assert!(matches!(
            Arrangement::centered([3, 3, 3], -1.0),
            Err(ArrangementError::BadObjectSize(_)),
        ));
        assert!(matches!(
            Arrangement::centered([3, 3, 3], Float::NAN),
            Err(ArrangementError::BadObjectSize(_)),
        ));
        assert_eq!(
            Arrangement::centered([u16::MAX, u16::MAX, 2], 1.0),
            Err(ArrangementError::TooManyObjects([u16::MAX, u16::MAX, 2])),
        );
        // 65535 × 65535 × 1 fits in a `u32`.
        assert!(Arrangement::centered([u16::MAX, u16::MAX, 1], 1.0).is_ok());
    }

    #[test]
    fn test_object_size_is_kept_exactly() {
        for size in [0.1, 0.3, 0.7, 1.0 / 3.0, 2.9] {
            let arrangement = Arrangement::centered([2, 2, 2], size).unwrap();
            assert_eq!(arrangement.object_size(), size);
        }
    }

    #[test]
    fn test_layer_coordinates() {
        let arrangement = Arrangement::new([3, 2, 1], 1.0, Vector3::new(10.0, 0.0, -5.0)).unwrap();
        let s = arrangement.spacing();
        assert!((arrangement.layer_coordinate(Axis::X, 0) - (10.0 + s)).abs() < 1e-12);
        assert!((arrangement.layer_coordinate(Axis::X, 2) - (10.0 - s)).abs() < 1e-12);
        assert!((arrangement.layer_coordinate(Axis::Y, 0) - s / 2.0).abs() < 1e-12);
        assert!((arrangement.layer_coordinate(Axis::Z, 0) + 5.0).abs() < 1e-12);

        for axis in Axis::iter() {
            for i in 0..arrangement.count(axis) {
                let c = arrangement.layer_coordinate(axis, i);
                assert_eq!(arrangement.nearest_layer_index(axis, c), i as i64);
            }
        }
    }

    #[test]
    fn test_square_cross_section() {
        let arrangement = Arrangement::centered([3, 3, 2], 1.0).unwrap();
        assert!(arrangement.is_square_cross_section(Axis::Z));
        assert!(!arrangement.is_square_cross_section(Axis::X));
        assert!(!arrangement.is_square_cross_section(Axis::Y));
    }

    #[test]
    fn test_grid_coordinates_order() {
        let arrangement = Arrangement::centered([2, 1, 2], 1.0).unwrap();
        let coords: Vec<_> = arrangement.grid_coordinates().collect();
        assert_eq!(coords, vec![[0, 0, 0], [1, 0, 0], [0, 0, 1], [1, 0, 1]]);
        assert_eq!(arrangement.object_count(), 4);
    }

    #[test]
    fn test_exterior_faces() {
        let arrangement = Arrangement::centered([3, 3, 3], 1.0).unwrap();
        assert_eq!(arrangement.exterior_faces([1, 1, 1]), [None; 6]);
        assert_eq!(
            arrangement.exterior_faces([0, 2, 1]),
            [Some(3), None, None, Some(4), None, None],
        );
    }
}
