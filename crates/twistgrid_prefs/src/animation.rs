use serde::{Deserialize, Serialize};

/// Shortest allowed duration of a quarter turn, in milliseconds.
pub const MIN_TURN_DURATION: f64 = 16.0;

/// Animation timing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Milliseconds per quarter turn of a programmatic turn.
    pub turn_duration: f64,
    /// Milliseconds for a released layer to settle onto the nearest turn.
    pub snap_duration: f64,
}

impl Default for AnimationPreferences {
    fn default() -> Self {
        Self {
            turn_duration: 200.0,
            snap_duration: 200.0,
        }
    }
}

impl AnimationPreferences {
    /// Returns the duration of a quarter turn, clamped to
    /// [`MIN_TURN_DURATION`].
    pub fn turn_duration(&self) -> f64 {
        if self.turn_duration.is_nan() {
            return MIN_TURN_DURATION;
        }
        self.turn_duration.max(MIN_TURN_DURATION)
    }

    /// Returns the snap duration. Zero or invalid durations snap instantly.
    pub fn snap_duration(&self) -> f64 {
        if self.snap_duration.is_nan() {
            return 0.0;
        }
        self.snap_duration.max(0.0)
    }
}
