//! User preferences for twistgrid.
//!
//! Defaults are embedded from `default.yaml`. A user file, if present, is
//! layered on top of them.

#[macro_use]
extern crate lazy_static;

use std::path::Path;

use serde::{Deserialize, Serialize};

mod animation;
mod appearance;
mod interaction;

pub use animation::*;
pub use appearance::*;
pub use interaction::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    /// Preferences from the embedded defaults.
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

/// Every user-adjustable setting.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    /// Animation timing.
    pub animation: AnimationPreferences,
    /// Pointer drag behavior.
    pub interaction: InteractionPreferences,
    /// Face colors.
    pub appearance: AppearancePreferences,
}

impl Preferences {
    /// Loads preferences, layering the file at `path` (if any) over the
    /// defaults. A missing file is not an error. On any other error, logs a
    /// warning and returns the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        Self::try_load(path).unwrap_or_else(|e| {
            log::warn!("Error loading preferences: {e}");
            DEFAULT_PREFS.clone()
        })
    }

    /// Loads preferences, layering the file at `path` (if any) over the
    /// defaults.
    pub fn try_load(path: Option<&Path>) -> eyre::Result<Self> {
        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));
        if let Some(path) = path {
            config = config.add_source(
                config::File::from(path)
                    .format(PREFS_FILE_FORMAT)
                    .required(false),
            );
        }
        Ok(config.build()?.try_deserialize()?)
    }

    /// Writes the preferences to `path` as YAML, creating parent directories
    /// as needed.
    pub fn save(&self, path: &Path) -> eyre::Result<()> {
        if let Some(p) = path.parent() {
            std::fs::create_dir_all(p)?;
        }
        serde_norway::to_writer(std::fs::File::create(path)?, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_yaml_matches_default_impl() {
        assert_eq!(*DEFAULT_PREFS, Preferences::default());
        assert_eq!(Preferences::load(None), Preferences::default());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load(Some(&dir.path().join("nope.yaml")));
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_load_partial_user_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");
        std::fs::write(&path, "animation:\n  turn_duration: 5\n").unwrap();
        let prefs = Preferences::load(Some(&path));
        assert_eq!(prefs.animation.turn_duration, 5.0);
        assert_eq!(prefs.animation.turn_duration(), MIN_TURN_DURATION);
        assert_eq!(prefs.animation.snap_duration, 200.0);
        assert_eq!(prefs.interaction, InteractionPreferences::default());
    }

    #[test]
    fn test_load_bad_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");
        std::fs::write(&path, "animation: [this is not a map\n").unwrap();
        assert!(Preferences::try_load(Some(&path)).is_err());
        assert_eq!(Preferences::load(Some(&path)), Preferences::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.yaml");
        let mut prefs = Preferences::default();
        prefs.interaction.drag_speed = 0.02;
        prefs.appearance.colors[0] = "#123456".to_owned();
        prefs.save(&path).unwrap();
        assert_eq!(Preferences::load(Some(&path)), prefs);
    }
}
