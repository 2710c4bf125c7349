use std::fmt;

use strum::VariantArray;

use crate::{Float, Vector3};

/// One of the three orthogonal axes of an arrangement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, VariantArray)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Axis {
    /// Returns all three axes in order.
    pub fn iter() -> impl Iterator<Item = Axis> {
        Self::VARIANTS.iter().copied()
    }

    /// Returns the index of the axis: 0 for X, 1 for Y, and 2 for Z.
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Returns the lowercase letter used for the axis in turn codes.
    pub const fn to_char(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }
    /// Parses a lowercase axis letter.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'x' => Some(Axis::X),
            'y' => Some(Axis::Y),
            'z' => Some(Axis::Z),
            _ => None,
        }
    }

    /// Returns the next axis in cyclic order (X → Y → Z → X).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// Returns the two other axes, in cyclic order starting after `self`.
    pub const fn others(self) -> [Axis; 2] {
        [self.next(), self.next().next()]
    }

    /// Returns the axis that is neither `self` nor `other`, or `None` if they
    /// are the same axis.
    pub fn third(self, other: Axis) -> Option<Axis> {
        Axis::iter().find(|&a| a != self && a != other)
    }

    /// Returns the unit vector pointing along the positive axis.
    pub fn unit_vector(self) -> Vector3 {
        let mut v = Vector3::new(0.0, 0.0, 0.0);
        v[self.index()] = 1.0;
        v
    }

    /// Returns the component of `v` along the axis.
    pub fn component(self, v: Vector3) -> Float {
        v[self.index()]
    }
    /// Returns a mutable reference to the component of `v` along the axis.
    pub fn component_mut(self, v: &mut Vector3) -> &mut Float {
        &mut v[self.index()]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_axis_cycle() {
        assert_eq!(Axis::X.others(), [Axis::Y, Axis::Z]);
        assert_eq!(Axis::Y.others(), [Axis::Z, Axis::X]);
        assert_eq!(Axis::Z.others(), [Axis::X, Axis::Y]);
        assert_eq!(Axis::X.third(Axis::Z), Some(Axis::Y));
        assert_eq!(Axis::Y.third(Axis::Y), None);
    }

    #[test]
    fn test_axis_chars() {
        for axis in Axis::iter() {
            assert_eq!(Axis::from_char(axis.to_char()), Some(axis));
            assert_eq!(axis.to_string(), axis.to_char().to_string());
        }
        assert_eq!(Axis::from_char('X'), None);
        assert_eq!(Axis::from_char('w'), None);
    }
}
