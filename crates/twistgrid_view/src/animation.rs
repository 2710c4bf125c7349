//! Time-based rotation of layers.

use twistgrid_core::{Float, Layer, ObjectId, QUARTER_TURN, TurnCode};

/// Tolerance for deciding that a snap has reached its target.
pub(crate) const SNAP_EPSILON: Float = 1e-4;

/// Animation of a released layer settling onto the nearest turn.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SnapAnimation {
    /// Layer being snapped.
    pub layer: Layer,
    /// Objects to rotate.
    pub members: Vec<ObjectId>,
    /// Total angle to rotate by.
    pub snap_delta: Float,
    /// Angle rotated so far.
    pub rotated: Float,
}

impl SnapAnimation {
    /// Advances the animation by `dt` milliseconds and returns the angle to
    /// rotate by this frame.
    pub fn proceed(&mut self, dt: Float, snap_duration: Float) -> Float {
        let remaining = self.snap_delta - self.rotated;
        let mut delta = if snap_duration > 0.0 {
            self.snap_delta * dt / snap_duration
        } else {
            remaining
        };
        delta = if self.snap_delta < 0.0 {
            delta.max(remaining)
        } else {
            delta.min(remaining)
        };
        self.rotated += delta;
        delta
    }

    /// Returns whether the layer has reached its target.
    pub fn is_done(&self) -> bool {
        (self.rotated - self.snap_delta).abs() < SNAP_EPSILON
    }
}

/// Animation of a single programmatic turn.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TurnAnimation {
    /// Turn being made.
    pub code: TurnCode,
    /// Objects to rotate.
    pub members: Vec<ObjectId>,
    /// Unsigned angle to rotate by: a quarter turn, or a half turn for layers
    /// with a non-square cross-section.
    pub target: Float,
    /// Unsigned angle rotated so far.
    pub rotated: Float,
}

impl TurnAnimation {
    /// Constructs an animation for `code`, rotating `members`.
    pub fn new(code: TurnCode, members: Vec<ObjectId>, square_cross_section: bool) -> Self {
        let target = if square_cross_section {
            QUARTER_TURN
        } else {
            2.0 * QUARTER_TURN
        };
        Self {
            code,
            members,
            target,
            rotated: 0.0,
        }
    }

    /// Advances the animation by `dt` milliseconds and returns the signed
    /// angle to rotate by this frame. The last step lands exactly on the
    /// target.
    pub fn proceed(&mut self, dt: Float, turn_duration: Float) -> Float {
        let mut delta = QUARTER_TURN * dt / turn_duration;
        if self.rotated + delta >= self.target {
            delta = self.target - self.rotated;
            self.rotated = self.target;
        } else {
            self.rotated += delta;
        }
        delta * self.code.direction.signum()
    }

    /// Returns whether the turn is complete.
    pub fn is_done(&self) -> bool {
        self.rotated >= self.target
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use twistgrid_core::{Axis, TurnDirection};

    use super::*;

    fn snap(snap_delta: Float) -> SnapAnimation {
        SnapAnimation {
            layer: Layer { axis: Axis::X, index: 0 },
            members: vec![],
            snap_delta,
            rotated: 0.0,
        }
    }

    #[test]
    fn test_snap_first_frame_is_still() {
        let mut anim = snap(0.5);
        assert_eq!(anim.proceed(0.0, 200.0), 0.0);
        assert!(!anim.is_done());
    }

    #[test]
    fn test_snap_reaches_target_without_overshoot() {
        for snap_delta in [0.7, -0.7] {
            let mut anim = snap(snap_delta);
            let mut total = 0.0;
            let mut frames = 0;
            while !anim.is_done() {
                total += anim.proceed(16.0, 200.0);
                frames += 1;
                assert!(total.abs() <= snap_delta.abs() + 1e-12);
            }
            assert!((total - snap_delta).abs() < SNAP_EPSILON);
            assert_eq!(frames, 13);
        }
    }

    #[test]
    fn test_snap_zero_duration_is_instant() {
        let mut anim = snap(-0.3);
        assert_eq!(anim.proceed(0.0, 0.0), -0.3);
        assert!(anim.is_done());
    }

    #[test]
    fn test_turn_lands_on_quarter_turn() {
        let code = TurnCode::new(Axis::Y, 0, TurnDirection::Clockwise);
        let mut anim = TurnAnimation::new(code, vec![], true);
        assert_eq!(anim.proceed(0.0, 200.0), 0.0);
        let mut total = 0.0;
        while !anim.is_done() {
            total += anim.proceed(30.0, 200.0);
        }
        assert_eq!(total, -QUARTER_TURN);
    }

    #[test]
    fn test_turn_non_square_is_half_turn() {
        let code = TurnCode::new(Axis::Z, 1, TurnDirection::Counterclockwise);
        let mut anim = TurnAnimation::new(code, vec![], false);
        let mut total = 0.0;
        let mut frames = 0;
        while !anim.is_done() {
            total += anim.proceed(60.0, 200.0);
            frames += 1;
        }
        assert_eq!(total, 2.0 * QUARTER_TURN);
        assert_eq!(frames, 7);
    }
}
