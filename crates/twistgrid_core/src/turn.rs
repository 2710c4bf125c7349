use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use regex::Regex;
use thiserror::Error;

use crate::{Axis, Float, Layer, QUARTER_TURN};

/// Direction of a quarter turn.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TurnDirection {
    /// Clockwise when viewed from the positive end of the axis. Written with
    /// no suffix.
    #[default]
    Clockwise,
    /// Counterclockwise when viewed from the positive end of the axis. Written
    /// with a `'` suffix.
    Counterclockwise,
}

impl TurnDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub fn rev(self) -> Self {
        match self {
            Self::Clockwise => Self::Counterclockwise,
            Self::Counterclockwise => Self::Clockwise,
        }
    }

    /// Returns the sign of the rotation angle: −1 for clockwise and +1 for
    /// counterclockwise.
    pub fn signum(self) -> Float {
        match self {
            Self::Clockwise => -1.0,
            Self::Counterclockwise => 1.0,
        }
    }
}

/// Symbolic code for a quarter turn of one layer, such as `x0` or `y2'`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TurnCode {
    /// Layer to turn.
    pub layer: Layer,
    /// Direction to turn it.
    pub direction: TurnDirection,
}

impl TurnCode {
    /// Constructs a turn code.
    pub fn new(axis: Axis, index: u16, direction: TurnDirection) -> Self {
        Self {
            layer: Layer { axis, index },
            direction,
        }
    }

    /// Returns the axis of the turn.
    pub fn axis(self) -> Axis {
        self.layer.axis
    }

    /// Returns the turn that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self {
            layer: self.layer,
            direction: self.direction.rev(),
        }
    }
    /// Returns whether `other` undoes this turn.
    pub fn is_inverse_of(self, other: TurnCode) -> bool {
        self.inverse() == other
    }

    /// Returns the signed angle of one quarter turn in this direction.
    pub fn quarter_turn_angle(self) -> Float {
        self.direction.signum() * QUARTER_TURN
    }
}

impl fmt::Display for TurnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.layer)?;
        if self.direction == TurnDirection::Counterclockwise {
            write!(f, "'")?;
        }
        Ok(())
    }
}

impl FromStr for TurnCode {
    type Err = ParseTurnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const TURN_CODE_PATTERN: &str = r"^(.)(\d+)('?)$";
        // match the whole string        ^         $
        // capture one axis character     (.)
        // capture the layer index           (\d+)
        // capture an optional prime              ('?)

        lazy_static! {
            static ref TURN_CODE_REGEX: Regex = Regex::new(TURN_CODE_PATTERN).expect("bad regex");
        }

        let captures = TURN_CODE_REGEX
            .captures(s)
            .ok_or_else(|| ParseTurnError::Malformed(s.to_owned()))?;
        let axis_char = captures[1].chars().next().unwrap_or_default();
        let axis = Axis::from_char(axis_char).ok_or(ParseTurnError::BadAxis(axis_char))?;
        let index = captures[2]
            .parse()
            .map_err(|_| ParseTurnError::BadLayer(captures[2].to_owned()))?;
        let direction = if captures[3].is_empty() {
            TurnDirection::Clockwise
        } else {
            TurnDirection::Counterclockwise
        };
        Ok(Self::new(axis, index, direction))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TurnCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TurnCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error encountered while parsing a turn code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseTurnError {
    /// The string does not have the shape of a turn code.
    #[error("not a turn code: {0:?}")]
    Malformed(String),
    /// The first character is not `x`, `y`, or `z`.
    #[error("bad axis: {0:?}")]
    BadAxis(char),
    /// The layer index does not fit in a layer number.
    #[error("bad layer index: {0:?}")]
    BadLayer(String),
}

/// Ordered record of every committed turn.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TurnHistory(Vec<TurnCode>);

impl TurnHistory {
    /// Constructs an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn.
    pub fn push(&mut self, turn: TurnCode) {
        self.0.push(turn);
    }
    /// Removes every turn.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns the turns, oldest first.
    pub fn as_slice(&self) -> &[TurnCode] {
        &self.0
    }
    /// Returns the number of turns.
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// Returns whether there are no turns.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Returns the most recent turn.
    pub fn last(&self) -> Option<TurnCode> {
        self.0.last().copied()
    }
}

impl fmt::Display for TurnHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

impl Extend<TurnCode> for TurnHistory {
    fn extend<T: IntoIterator<Item = TurnCode>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_turn_code() {
        assert_eq!("x0".parse(), Ok(TurnCode::new(Axis::X, 0, TurnDirection::Clockwise)));
        assert_eq!(
            "y12'".parse(),
            Ok(TurnCode::new(Axis::Y, 12, TurnDirection::Counterclockwise)),
        );
        assert_eq!("w1".parse::<TurnCode>(), Err(ParseTurnError::BadAxis('w')));
        assert_eq!("X1".parse::<TurnCode>(), Err(ParseTurnError::BadAxis('X')));
        assert!(matches!("z".parse::<TurnCode>(), Err(ParseTurnError::Malformed(_))));
        assert!(matches!("z1''".parse::<TurnCode>(), Err(ParseTurnError::Malformed(_))));
        assert!(matches!("z-1".parse::<TurnCode>(), Err(ParseTurnError::Malformed(_))));
        assert!(matches!("z99999".parse::<TurnCode>(), Err(ParseTurnError::BadLayer(_))));
    }

    #[test]
    fn test_turn_code_display() {
        for s in ["x0", "x0'", "z17", "y3'"] {
            assert_eq!(s.parse::<TurnCode>().unwrap().to_string(), s);
        }
    }

    #[test]
    fn test_inverse() {
        let t: TurnCode = "y1".parse().unwrap();
        assert_eq!(t.inverse().to_string(), "y1'");
        assert_eq!(t.inverse().inverse(), t);
        assert!(t.is_inverse_of(t.inverse()));
        assert!(!t.is_inverse_of(t));
        assert!(t.quarter_turn_angle() < 0.0);
        assert!(t.inverse().quarter_turn_angle() > 0.0);
    }

    #[test]
    fn test_history() {
        let mut history = TurnHistory::new();
        assert!(history.is_empty());
        history.push("x0".parse().unwrap());
        history.extend(["y1'".parse().unwrap(), "y1'".parse().unwrap()]);
        assert_eq!(history.len(), 3);
        assert_eq!(history.to_string(), "x0 y1' y1'");
        assert_eq!(history.last(), Some("y1'".parse().unwrap()));
        history.clear();
        assert_eq!(history, TurnHistory::new());
    }
}
