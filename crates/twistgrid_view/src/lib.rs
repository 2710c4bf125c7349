//! Interaction state manager for twistgrid arrangements.
//!
//! The host application owns the scene and forwards pointer input and frame
//! timestamps to an [`Engine`]. The engine decides which objects move and
//! calls back into the host through [`HostServices`].

mod animation;
mod engine;
mod gesture;
mod host;

pub use engine::{Engine, InteractionMode};
pub use host::{HostServices, RayHit};
pub use twistgrid_prefs::Preferences;
