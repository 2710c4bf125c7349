use std::fmt;

use cgmath::{Rad, SquareMatrix};

use crate::{Arrangement, Axis, Float, LAYER_TOLERANCE, Matrix3, Vector3};

/// Opaque handle to one object of an arrangement.
///
/// The host maps its own scene objects to these handles.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl ObjectId {
    /// Returns the handle as an index into the list of slots.
    pub fn to_index(self) -> usize {
        self.0 as usize
    }
}

/// Slice of the arrangement perpendicular to an axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layer {
    /// Axis perpendicular to the layer.
    pub axis: Axis,
    /// Index of the layer. Layer 0 has the most positive coordinate.
    pub index: u16,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.axis, self.index)
    }
}

/// Tracked state of one object.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSlot {
    /// Handle of the object.
    pub id: ObjectId,
    /// Grid coordinates of the object in the solved state.
    pub grid: [u16; 3],
    /// Current world-space position of the object's center.
    pub position: Vector3,
    /// Current orientation of the object relative to its solved state.
    pub orientation: Matrix3,
}

/// Information passed to the host when an object is created.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSpawn {
    /// Handle of the new object.
    pub id: ObjectId,
    /// Grid coordinates of the object.
    pub grid: [u16; 3],
    /// Initial world-space position of the object's center.
    pub position: Vector3,
    /// Edge length of the object.
    pub size: Float,
    /// Palette index for each face (+X, −X, +Y, −Y, +Z, −Z), or `None` for
    /// interior faces.
    pub faces: [Option<usize>; 6],
}

/// Position store for all the objects of an arrangement.
#[derive(Debug, Clone)]
pub struct Layout {
    arrangement: Arrangement,
    slots: Vec<ObjectSlot>,
}

impl Layout {
    /// Constructs a layout with every object in its canonical position.
    pub fn new(arrangement: Arrangement) -> Self {
        let slots = arrangement
            .grid_coordinates()
            .enumerate()
            .map(|(i, grid)| ObjectSlot {
                // `Arrangement::new()` rejects more than `u32::MAX` objects.
                id: ObjectId(i as u32),
                grid,
                position: arrangement.grid_position(grid),
                orientation: Matrix3::identity(),
            })
            .collect();
        Self { arrangement, slots }
    }

    /// Returns the arrangement.
    pub fn arrangement(&self) -> &Arrangement {
        &self.arrangement
    }

    /// Returns all the slots, in creation order.
    pub fn slots(&self) -> &[ObjectSlot] {
        &self.slots
    }
    /// Returns the slot for an object, or `None` if the object does not belong
    /// to this layout.
    pub fn slot(&self, id: ObjectId) -> Option<&ObjectSlot> {
        self.slots.get(id.to_index())
    }
    /// Returns whether `id` belongs to this layout.
    pub fn contains(&self, id: ObjectId) -> bool {
        id.to_index() < self.slots.len()
    }
    /// Returns the handles of all objects.
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.slots.iter().map(|slot| slot.id)
    }

    /// Returns the spawn information for every object, in creation order.
    pub fn spawns(&self) -> Vec<ObjectSpawn> {
        let size = self.arrangement.object_size();
        self.slots
            .iter()
            .map(|slot| ObjectSpawn {
                id: slot.id,
                grid: slot.grid,
                position: slot.position,
                size,
                faces: self.arrangement.exterior_faces(slot.grid),
            })
            .collect()
    }

    /// Returns whether `layer` exists in the arrangement.
    pub fn is_valid_layer(&self, layer: Layer) -> bool {
        self.arrangement.contains_layer(layer.axis, layer.index)
    }

    /// Returns the objects currently in `layer`, in creation order.
    ///
    /// Returns an empty list if the layer index is out of range.
    pub fn layer_members(&self, layer: Layer) -> Vec<ObjectId> {
        if !self.is_valid_layer(layer) {
            return vec![];
        }
        let coordinate = self.arrangement.layer_coordinate(layer.axis, layer.index);
        self.slots
            .iter()
            .filter(|slot| (layer.axis.component(slot.position) - coordinate).abs() < LAYER_TOLERANCE)
            .map(|slot| slot.id)
            .collect()
    }

    /// Returns the layer along `axis` that contains the object, or `None` if
    /// the object is unknown or lies outside the grid.
    pub fn layer_of(&self, id: ObjectId, axis: Axis) -> Option<Layer> {
        let slot = self.slot(id)?;
        let index = self
            .arrangement
            .nearest_layer_index(axis, axis.component(slot.position));
        let index = u16::try_from(index).ok()?;
        let layer = Layer { axis, index };
        self.is_valid_layer(layer).then_some(layer)
    }

    /// Rotates the given objects by `radians` around the line through the
    /// arrangement's origin parallel to `axis`.
    ///
    /// Positive angles are counterclockwise when viewed from the positive end
    /// of the axis.
    pub fn rotate(&mut self, ids: &[ObjectId], axis: Axis, radians: Float) {
        let rotation = Matrix3::from_axis_angle(axis.unit_vector(), Rad(radians));
        let origin = self.arrangement.origin();
        for &id in ids {
            if let Some(slot) = self.slots.get_mut(id.to_index()) {
                slot.position = rotation * (slot.position - origin) + origin;
                slot.orientation = rotation * slot.orientation;
            }
        }
    }

    /// Snaps the given objects onto the half-spacing lattice and removes
    /// accumulated error from their orientations.
    pub fn snap_to_lattice(&mut self, ids: &[ObjectId]) {
        for &id in ids {
            if let Some(slot) = self.slots.get_mut(id.to_index()) {
                snap_slot(&self.arrangement, slot);
            }
        }
    }
    /// Snaps every object onto the half-spacing lattice.
    pub fn snap_all_to_lattice(&mut self) {
        for slot in &mut self.slots {
            snap_slot(&self.arrangement, slot);
        }
    }

    /// Returns whether every object lies exactly on the half-spacing lattice
    /// with an axis-aligned orientation.
    pub fn is_on_lattice(&self) -> bool {
        self.slots.iter().all(|slot| {
            slot.position == self.arrangement.snap_to_lattice(slot.position)
                && slot.orientation == round_matrix(slot.orientation)
        })
    }

    /// Moves every object back to its canonical position and orientation.
    pub fn reset_positions(&mut self) {
        for slot in &mut self.slots {
            slot.position = self.arrangement.grid_position(slot.grid);
            slot.orientation = Matrix3::identity();
        }
    }
}

fn snap_slot(arrangement: &Arrangement, slot: &mut ObjectSlot) {
    slot.position = arrangement.snap_to_lattice(slot.position);
    slot.orientation = round_matrix(slot.orientation);
}

/// Rounds every entry of a rotation matrix to the nearest integer. Rotations
/// by multiples of a quarter turn have only 0 and ±1 entries.
fn round_matrix(m: Matrix3) -> Matrix3 {
    Matrix3::from_cols(
        m.x.map(Float::round),
        m.y.map(Float::round),
        m.z.map(Float::round),
    )
}
