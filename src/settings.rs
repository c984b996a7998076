//! Game settings loaded from `settings.json`.
//!
//! Every field has a default, so the file may be missing entirely or only
//! override a handful of values. Each section is inserted into the app as its
//! own resource.

use std::{fs, io, path::Path};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default location of the settings file, relative to the working directory.
pub const SETTINGS_PATH: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct GameSettings {
    pub window: WindowSettings,
    pub camera: CameraSettings,
    pub input: InputSettings,
    pub console: ConsoleSettings,
    pub account: AccountSettings,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    /// Filter passed to the log plugin, `RUST_LOG` syntax.
    pub log_filter: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Wayfarer".to_string(),
            log_filter: "wgpu=error,naga=warn,wayfarer=debug".to_string(),
        }
    }
}

/// Camera tuning. Angles are in degrees.
#[derive(Resource, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CameraSettings {
    pub first_person_fov: f32,
    pub third_person_fov: f32,
    pub first_person_mouse_x_speed: f32,
    pub first_person_mouse_y_speed: f32,
    pub third_person_mouse_x_speed: f32,
    pub third_person_mouse_y_speed: f32,
    /// Multiplier applied to third person mouse input.
    pub orbit_scale: f32,
    /// Distance change per unit of scroll.
    pub zoom_speed: f32,
    pub start_distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            first_person_fov: 90.0,
            third_person_fov: 70.0,
            first_person_mouse_x_speed: 30.0,
            first_person_mouse_y_speed: 25.0,
            third_person_mouse_x_speed: 30.0,
            third_person_mouse_y_speed: 25.0,
            orbit_scale: 0.02,
            zoom_speed: 5.0,
            start_distance: 3.5,
            min_distance: 1.0,
            max_distance: 8.0,
            pitch_min: -20.0,
            pitch_max: 80.0,
        }
    }
}

/// Conversion from raw device deltas into mouse axis values.
#[derive(Resource, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InputSettings {
    /// Axis units per pixel of mouse motion.
    pub mouse_axis_scale: f32,
    /// Scroll axis units per wheel notch.
    pub scroll_line_scale: f32,
    /// Scroll axis units per pixel, for touchpads.
    pub scroll_pixel_scale: f32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            mouse_axis_scale: 0.1,
            scroll_line_scale: 0.1,
            scroll_pixel_scale: 0.002,
        }
    }
}

#[derive(Resource, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Number of visible console lines.
    pub lines: usize,
    pub font_size: f32,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            lines: 8,
            font_size: 16.0,
        }
    }
}

#[derive(Resource, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AccountSettings {
    pub account: String,
    /// JSON file holding the character record for `account`.
    pub character_file: String,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            account: "guest".to_string(),
            character_file: "assets/characters/guest.json".to_string(),
        }
    }
}

impl GameSettings {
    /// Reads settings from `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let settings = match fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json(contents: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let camera = &self.camera;
        if camera.min_distance <= 0.0 || camera.min_distance >= camera.max_distance {
            return Err(invalid(
                "camera.min_distance",
                format!(
                    "must be positive and below max_distance ({} >= {})",
                    camera.min_distance, camera.max_distance
                ),
            ));
        }
        if !(camera.min_distance..=camera.max_distance).contains(&camera.start_distance) {
            return Err(invalid(
                "camera.start_distance",
                format!(
                    "{} is outside [{}, {}]",
                    camera.start_distance, camera.min_distance, camera.max_distance
                ),
            ));
        }
        if camera.pitch_min >= camera.pitch_max {
            return Err(invalid(
                "camera.pitch_min",
                format!("{} must be below pitch_max {}", camera.pitch_min, camera.pitch_max),
            ));
        }
        for (field, fov) in [
            ("camera.first_person_fov", camera.first_person_fov),
            ("camera.third_person_fov", camera.third_person_fov),
        ] {
            if !(fov > 0.0 && fov < 180.0) {
                return Err(invalid(field, format!("{fov} is not in (0, 180)")));
            }
        }
        if self.console.lines == 0 {
            return Err(invalid("console.lines", "must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> SettingsError {
    SettingsError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GameSettings::default().validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings =
            GameSettings::from_json(r#"{ "camera": { "max_distance": 12.0 }, "console": { "lines": 4 } }"#)
                .unwrap();
        assert_eq!(settings.camera.max_distance, 12.0);
        assert_eq!(settings.camera.min_distance, 1.0);
        assert_eq!(settings.console.lines, 4);
        assert_eq!(settings.account.account, "guest");
    }

    #[test]
    fn inverted_distance_range_is_rejected() {
        let mut settings = GameSettings::default();
        settings.camera.min_distance = 9.0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid { field: "camera.min_distance", .. })
        ));
    }

    #[test]
    fn zero_console_lines_is_rejected() {
        let mut settings = GameSettings::default();
        settings.console.lines = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = GameSettings::load_or_default("does/not/exist/settings.json").unwrap();
        assert_eq!(settings.camera, CameraSettings::default());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            GameSettings::from_json("{ camera: nope }"),
            Err(SettingsError::Parse(_))
        ));
    }
}
