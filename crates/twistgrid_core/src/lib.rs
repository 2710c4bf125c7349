//! Layer model and turn bookkeeping for grid-shaped layered twisty puzzles.
//!
//! An arrangement is an `x × y × z` grid of rigid objects. Any slice of the
//! grid perpendicular to one of the three axes is a [`Layer`] that can be
//! turned by a quarter or half turn. This crate owns the positions of the
//! objects, answers layer membership queries, and converts the continuous
//! angle of a drag into the nearest discrete turn.

#[macro_use]
extern crate lazy_static;

mod arrangement;
mod axis;
mod layout;
pub mod quantize;
pub mod scramble;
mod turn;

pub use arrangement::{Arrangement, ArrangementError};
pub use axis::Axis;
pub use layout::{Layer, Layout, ObjectId, ObjectSlot, ObjectSpawn};
pub use quantize::{DiscreteTurn, QuantizedTurn, quantize_drag};
pub use turn::{ParseTurnError, TurnCode, TurnDirection, TurnHistory};

/// Floating-point type used for all geometry.
pub type Float = f64;

/// 3D vector type used for positions and directions.
pub type Vector3 = cgmath::Vector3<Float>;
/// 3x3 matrix type used for object orientations.
pub type Matrix3 = cgmath::Matrix3<Float>;

/// Ratio between the distance separating neighboring objects and the edge
/// length of one object.
pub const SPACING_FACTOR: Float = 1.1;

/// Tolerance used when testing whether an object lies in a layer.
pub const LAYER_TOLERANCE: Float = 1e-7;

/// One quarter turn, in radians.
pub const QUARTER_TURN: Float = std::f64::consts::FRAC_PI_2;
