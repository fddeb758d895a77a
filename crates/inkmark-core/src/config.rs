//! Editor configuration.

use crate::color::ModelColor;
use crate::shapes::ShapeKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Minimum pointer travel before a drag creates a shape, per kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreationThresholds {
    pub arrow: f64,
    pub rect: f64,
    pub pen: f64,
}

impl Default for CreationThresholds {
    fn default() -> Self {
        Self {
            arrow: 5.0,
            rect: 5.0,
            pen: 1.0,
        }
    }
}

impl CreationThresholds {
    pub fn for_kind(&self, kind: ShapeKind) -> f64 {
        match kind {
            ShapeKind::Arrow => self.arrow,
            ShapeKind::Rect => self.rect,
            ShapeKind::Pen => self.pen,
        }
    }
}

/// Tunable editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Side length of the square drawn for a knob.
    pub knob_size: f64,
    /// Distance from a knob's anchor that still counts as a hit.
    pub knob_hit_radius: f64,
    /// Fill color of knob visuals.
    pub knob_color: ModelColor,
    /// Outline width of rectangles.
    pub rect_line_width: f64,
    /// Stroke width of pen strokes.
    pub pen_line_width: f64,
    /// Extra slack around thin shapes when hit-testing.
    pub hit_tolerance: f64,
    /// Minimum drag distance for shape creation.
    pub min_drag_distance: CreationThresholds,
    /// Color new shapes start with.
    pub create_color: ModelColor,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            knob_size: 10.0,
            knob_hit_radius: 8.0,
            knob_color: ModelColor::new(1.0, 1.0, 1.0, 1.0),
            rect_line_width: 5.0,
            pen_line_width: 5.0,
            hit_tolerance: 2.0,
            min_drag_distance: CreationThresholds::default(),
            create_color: ModelColor::default_color(),
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from the default location, falling back to defaults when no file exists.
    ///
    /// On Unix: `~/.config/inkmark/config.json`
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Default config file location, if a config directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("inkmark").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{ "knob_size": 14.0, "min_drag_distance": { "pen": 3.0 } }"#).unwrap();
        assert!((config.knob_size - 14.0).abs() < f64::EPSILON);
        assert!((config.min_drag_distance.pen - 3.0).abs() < f64::EPSILON);
        assert!((config.min_drag_distance.rect - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.create_color, ModelColor::ORANGE);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(EditorConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "rect_line_width": 2.5 }"#).unwrap();
        let config = EditorConfig::load(&path).unwrap();
        assert!((config.rect_line_width - 2.5).abs() < f64::EPSILON);

        let missing = EditorConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_thresholds_per_kind() {
        let thresholds = CreationThresholds::default();
        assert!((thresholds.for_kind(ShapeKind::Rect) - 5.0).abs() < f64::EPSILON);
        assert!((thresholds.for_kind(ShapeKind::Pen) - 1.0).abs() < f64::EPSILON);
    }
}
