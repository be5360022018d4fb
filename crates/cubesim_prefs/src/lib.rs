//! User preferences for the cube simulator.
//!
//! Defaults are embedded in the binary. A user preferences file, if present,
//! is layered on top of them, so it only needs to contain the values that
//! differ from the defaults.

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate strum;

use std::path::Path;

use cubesim_core::CubeGeometry;
use eyre::{Result, ensure};
use serde::{Deserialize, Serialize};

mod animations;
pub mod paths;
pub mod persist;

pub use animations::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    /// Preferences used when no user preferences can be loaded.
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

/// All user preferences.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    /// Dimensions of the cube.
    pub geometry: CubeGeometry,
    /// Timing of face-turn animations.
    pub animation: AnimationPreferences,
}
impl Preferences {
    /// Loads preferences from `path`, or from the user preferences file if
    /// `path` is `None`. If loading fails, the default preferences are
    /// returned and an unreadable user preferences file is backed up.
    pub fn load(path: Option<&Path>) -> Self {
        lazy_static::initialize(&DEFAULT_PREFS);

        Self::try_load(path).unwrap_or_else(|e| {
            log::warn!("Error loading preferences: {e}");
            if path.is_none() {
                if let Ok(user_prefs_file) = paths::prefs_file() {
                    persist::backup_prefs_file(user_prefs_file);
                }
            }
            DEFAULT_PREFS.clone()
        })
    }

    /// Loads preferences from `path`, or from the user preferences file if
    /// `path` is `None`, layered on top of the defaults.
    pub fn try_load(path: Option<&Path>) -> Result<Self> {
        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));

        match path {
            Some(p) => config = config.add_source(persist::explicit_config_source(p)),
            None => match persist::user_config_source() {
                Ok(config_source) => config = config.add_source(config_source),
                Err(e) => log::warn!("Error loading user preferences: {e}"),
            },
        }

        let prefs: Self = config.build()?.try_deserialize()?;
        prefs.validate()?;
        Ok(prefs)
    }

    /// Saves preferences to `path`, or to the user preferences file if `path`
    /// is `None`.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let path = match path {
            Some(p) => p,
            None => paths::prefs_file()?,
        };
        persist::save(path, self)
    }

    /// Returns the preferences as a YAML document.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_norway::to_string(self)?)
    }

    /// Returns an error if any value is out of range.
    pub fn validate(&self) -> Result<()> {
        let CubeGeometry {
            piece_size,
            gap,
            drift_tolerance,
        } = self.geometry;
        ensure!(
            piece_size.is_finite() && piece_size > 0.0,
            "piece size must be positive, got {piece_size}",
        );
        ensure!(
            gap.is_finite() && gap >= 0.0,
            "gap must not be negative, got {gap}",
        );
        ensure!(
            drift_tolerance > 0.0 && drift_tolerance < 0.5,
            "drift tolerance must be between 0 and 0.5, got {drift_tolerance}",
        );

        let twist_duration = self.animation.twist_duration;
        ensure!(
            twist_duration.is_finite() && twist_duration >= 0.0,
            "twist duration must not be negative, got {twist_duration}",
        );
        Ok(())
    }
}
