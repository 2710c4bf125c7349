use serde::{Deserialize, Serialize};

/// Pointer drag behavior.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InteractionPreferences {
    /// Squared distance in pixels that the pointer must travel before a drag
    /// picks its axis.
    pub drag_threshold_sq: f64,
    /// Radians of layer rotation per pixel of pointer travel.
    pub drag_speed: f64,
}

impl Default for InteractionPreferences {
    fn default() -> Self {
        Self {
            drag_threshold_sq: 3.0,
            drag_speed: 0.01,
        }
    }
}
