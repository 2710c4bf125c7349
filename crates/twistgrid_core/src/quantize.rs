//! Conversion of a continuous drag angle into a discrete turn.

use smallvec::{SmallVec, smallvec};

use crate::{Float, Layer, QUARTER_TURN, TurnCode, TurnDirection};

/// Discrete turn chosen at the end of a drag.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DiscreteTurn {
    /// Single quarter turn.
    Quarter(TurnDirection),
    /// Half turn. The direction is irrelevant.
    Double,
}

/// Result of quantizing the angle accumulated during a drag.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuantizedTurn {
    /// Number of quarter turns, signed by the direction of the drag, in the
    /// range `-3..=3`.
    pub slot: i32,
    /// Angle that the layer must still rotate, starting from its current
    /// position, to land on the chosen turn.
    pub snap_delta: Float,
    /// Turn to record, or `None` if the layer returns to where it started.
    pub turn: Option<DiscreteTurn>,
}

impl QuantizedTurn {
    /// Returns the turn codes to append to the history when the turn is made
    /// on `layer`. A half turn is recorded as the same code twice.
    pub fn turn_codes(&self, layer: Layer) -> SmallVec<[TurnCode; 2]> {
        match self.turn {
            None => smallvec![],
            Some(DiscreteTurn::Quarter(direction)) => smallvec![TurnCode { layer, direction }],
            Some(DiscreteTurn::Double) => {
                let code = TurnCode {
                    layer,
                    direction: TurnDirection::Clockwise,
                };
                smallvec![code, code]
            }
        }
    }
}

/// Quantizes the total angle `total_rotated` (in radians) that a layer was
/// dragged to the nearest valid turn.
///
/// Layers whose cross-section is not square can only make half turns, so for
/// them an odd number of quarter turns is rounded away from zero to the next
/// even number.
pub fn quantize_drag(total_rotated: Float, square_cross_section: bool) -> QuantizedTurn {
    let direction: i32 = if total_rotated > 0.0 {
        1
    } else if total_rotated < 0.0 {
        -1
    } else {
        0 // also NaN
    };
    let magnitude = if direction == 0 { 0.0 } else { total_rotated.abs() };

    let mut slot = (magnitude / QUARTER_TURN).floor() as i32 * direction;
    if magnitude % QUARTER_TURN > QUARTER_TURN / 2.0 {
        slot += direction;
    }
    if !square_cross_section && (direction * slot) % 2 == 1 {
        slot += direction;
    }
    slot %= 4;

    // A positive drag is a counterclockwise turn.
    let ccw = direction > 0;
    let turn = match slot.abs() {
        0 => None,
        1 => Some(DiscreteTurn::Quarter(direction_from_ccw(ccw))),
        2 => Some(DiscreteTurn::Double),
        _ => Some(DiscreteTurn::Quarter(direction_from_ccw(!ccw))),
    };

    let snap_delta = direction as Float * ((direction * slot) as Float * QUARTER_TURN - magnitude);

    QuantizedTurn {
        slot,
        snap_delta,
        turn,
    }
}

fn direction_from_ccw(ccw: bool) -> TurnDirection {
    if ccw {
        TurnDirection::Counterclockwise
    } else {
        TurnDirection::Clockwise
    }
}
