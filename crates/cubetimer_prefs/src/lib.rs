//! User preferences.
//!
//! Preferences are layered: the embedded `default.yaml` first, then the user's
//! preferences file on top of it. Keys missing from the user's file keep their
//! default values.

#[macro_use]
extern crate lazy_static;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cubetimer_core::{
    AnimationPreferences, CubeConfig, CubeType, FacePalette, Rgb, ValidatedCubeConfig,
};
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

pub mod paths;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

/// Maximum number of decimal places in displayed times.
pub const MAX_PRECISION: u32 = 3;

lazy_static! {
    /// Preferences from the embedded `default.yaml`.
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

/// Color theme.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// Dark background.
    #[default]
    Dark,
    /// Light background.
    Light,
    /// Colors from [`Preferences::custom_theme`].
    Custom,
}

/// Interface colors for [`Theme::Custom`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeColors {
    /// Top of the background gradient.
    pub background_start: Rgb,
    /// Bottom of the background gradient.
    pub background_end: Rgb,
    /// Text color.
    pub text: Rgb,
    /// Border color.
    pub border: Rgb,
    /// Secondary text color.
    pub muted: Rgb,
}
impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background_start: Rgb::new(0x50, 0x50, 0x50),
            background_end: Rgb::BLACK,
            text: Rgb::WHITE,
            border: Rgb::WHITE,
            muted: Rgb::new(0xa0, 0xa0, 0xa0),
        }
    }
}

/// User preferences.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Preferences {
    /// Selected cube size.
    pub cube_type: CubeType,
    /// Whether to count down inspection before each solve.
    pub inspection_enabled: bool,
    /// Number of decimal places in displayed times.
    pub precision: u32,
    /// Color theme.
    pub theme: Theme,
    /// Sticker colors.
    #[serde(default)]
    pub face_colors: FacePalette,
    /// Interface colors for the custom theme.
    #[serde(default)]
    pub custom_theme: ThemeColors,
    /// Twist animation settings.
    #[serde(default)]
    pub animation: AnimationPreferences,
    /// Overrides of the built-in cube configurations, keyed by cube type ID.
    #[serde(default)]
    pub cubes: BTreeMap<String, CubeConfig>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            cube_type: CubeType::default(),
            inspection_enabled: true,
            precision: MAX_PRECISION,
            theme: Theme::default(),
            face_colors: FacePalette::default(),
            custom_theme: ThemeColors::default(),
            animation: AnimationPreferences::default(),
            cubes: BTreeMap::new(),
        }
    }
}

impl Preferences {
    /// Loads preferences, layering the user's preferences file over the
    /// defaults. If `path` is `None`, the file in the user's config directory
    /// is used.
    ///
    /// Falls back to the defaults if the preferences cannot be loaded.
    pub fn load(path: Option<&Path>) -> Self {
        lazy_static::initialize(&DEFAULT_PREFS);

        Self::try_load(path).unwrap_or_else(|e| {
            log::warn!("Error loading preferences: {e:#}");
            DEFAULT_PREFS.clone()
        })
    }

    /// Loads preferences, returning an error if the user's preferences file
    /// is invalid. A missing file is not an error.
    pub fn try_load(path: Option<&Path>) -> Result<Self> {
        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));

        match user_prefs_path(path) {
            Ok(p) => {
                log::debug!("Loading preferences from {}", p.display());
                config = config.add_source(
                    config::File::from(p)
                        .format(PREFS_FILE_FORMAT)
                        .required(false),
                );
            }
            Err(e) => log::warn!("Error locating user preferences: {e}"),
        }

        let mut prefs: Self = config
            .build()
            .and_then(|c| c.try_deserialize())
            .wrap_err("invalid preferences")?;
        prefs.precision = prefs.precision.min(MAX_PRECISION);
        Ok(prefs)
    }

    /// Saves preferences as YAML. If `path` is `None`, the file in the user's
    /// config directory is used.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let path = user_prefs_path(path)?;
        if let Some(p) = path.parent() {
            std::fs::create_dir_all(p)?;
        }
        std::fs::write(&path, self.to_yaml()?)
            .wrap_err_with(|| format!("error writing preferences to {}", path.display()))?;
        Ok(())
    }

    /// Serializes the preferences to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_norway::to_string(self)?)
    }

    /// Returns the configuration for a cube type: the user's override if there
    /// is a valid one, otherwise the built-in configuration.
    pub fn cube_config(&self, cube_type: CubeType) -> ValidatedCubeConfig {
        let Some(config) = self.cubes.get(&cube_type.id()) else {
            return ValidatedCubeConfig::builtin(cube_type);
        };
        config.validate(cube_type).unwrap_or_else(|e| {
            log::warn!("Ignoring {cube_type} config override: {e}");
            ValidatedCubeConfig::builtin(cube_type)
        })
    }

    /// Returns the configuration for the selected cube type.
    pub fn active_cube_config(&self) -> ValidatedCubeConfig {
        self.cube_config(self.cube_type)
    }
}

fn user_prefs_path(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(p.to_owned()),
        None => Ok(paths::prefs_file()?.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_yaml_matches_default() {
        assert_eq!(*DEFAULT_PREFS, Preferences::default());
    }

    #[test]
    fn test_layering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");
        std::fs::write(
            &path,
            r##"
cube_type: "5x5"
precision: 7
face_colors:
  up: "#000000"
animation:
  twist_duration: 0.5
cubes:
  "5x5":
    label: "Short 5x5"
    scramble_length: 10
    moves: ["R", "U", "Fw"]
  "3x3":
    label: "Broken"
    scramble_length: 10
    moves: ["R", "L"]
"##,
        )
        .unwrap();

        let prefs = Preferences::try_load(Some(&path)).unwrap();
        assert_eq!(prefs.cube_type, CubeType::Cube5);
        assert_eq!(prefs.precision, MAX_PRECISION);
        assert!(prefs.inspection_enabled);
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.face_colors.up, Rgb::BLACK);
        assert_eq!(prefs.face_colors.front, FacePalette::default().front);
        assert_eq!(prefs.animation.twist_duration, 0.5);
        assert!(prefs.animation.dynamic_twist_speed);

        let config = prefs.active_cube_config();
        assert_eq!(config.label(), "Short 5x5");
        assert_eq!(config.scramble_length(), 10);
        assert_eq!(config.inspection_seconds(), 15);

        // invalid overrides fall back to the built-in config
        let config = prefs.cube_config(CubeType::Cube3);
        assert_eq!(config, ValidatedCubeConfig::builtin(CubeType::Cube3));
        let config = prefs.cube_config(CubeType::Cube7);
        assert_eq!(config, ValidatedCubeConfig::builtin(CubeType::Cube7));
    }

    #[test]
    fn test_missing_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");
        assert_eq!(Preferences::load(Some(&missing)), Preferences::default());

        let invalid = dir.path().join("invalid.yaml");
        std::fs::write(&invalid, "theme: [1, 2, 3]\n").unwrap();
        Preferences::try_load(Some(&invalid)).expect_err("theme is not a list");
        assert_eq!(Preferences::load(Some(&invalid)), Preferences::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.yaml");

        let mut prefs = Preferences::default();
        prefs.theme = Theme::Custom;
        prefs.inspection_enabled = false;
        prefs.custom_theme.text = Rgb::new(0x12, 0x34, 0x56);
        prefs
            .cubes
            .insert("2x2".to_owned(), CubeConfig::builtin(CubeType::Cube2));
        prefs.save(Some(&path)).unwrap();

        let yaml = std::fs::read_to_string(&path).unwrap();
        assert!(yaml.contains("theme: custom"));
        assert_eq!(Preferences::try_load(Some(&path)).unwrap(), prefs);
    }
}
