//! Annotation color model and the default palette.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// RGBA color with each channel normalized to `0.0..=1.0`.
///
/// Converted to [`peniko::Color`] at the rendering boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl ModelColor {
    pub const ORANGE: ModelColor = ModelColor::from_relative(255.0, 74.0, 1.0);
    pub const YELLOW: ModelColor = ModelColor::from_relative(255.0, 196.0, 62.0);
    pub const GREEN: ModelColor = ModelColor::from_relative(19.0, 208.0, 171.0);
    pub const FUSCHIA: ModelColor = ModelColor::from_relative(252.0, 28.0, 116.0);
    pub const VIOLET: ModelColor = ModelColor::from_relative(96.0, 97.0, 237.0);

    /// Fully transparent black, used for unfilled layers.
    pub const CLEAR: ModelColor = ModelColor::new(0.0, 0.0, 0.0, 0.0);

    /// Create a color from normalized channels.
    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self { red, green, blue, alpha }
    }

    /// Create an opaque color from 0–255 channel values.
    pub const fn from_relative(red: f64, green: f64, blue: f64) -> Self {
        Self::new(red / 255.0, green / 255.0, blue / 255.0, 1.0)
    }

    /// The color new shapes get when nothing else is chosen.
    pub const fn default_color() -> Self {
        DEFAULT_COLORS[0]
    }

    /// Palette shown to users, in display order.
    pub fn default_colors() -> &'static [ModelColor] {
        &DEFAULT_COLORS
    }
}

impl Default for ModelColor {
    fn default() -> Self {
        Self::default_color()
    }
}

/// The fixed default palette. Orange first.
pub const DEFAULT_COLORS: [ModelColor; 5] = [
    ModelColor::ORANGE,
    ModelColor::YELLOW,
    ModelColor::GREEN,
    ModelColor::FUSCHIA,
    ModelColor::VIOLET,
];

impl From<ModelColor> for Color {
    fn from(color: ModelColor) -> Self {
        Color::new([
            color.red as f32,
            color.green as f32,
            color.blue as f32,
            color.alpha as f32,
        ])
    }
}

impl From<Color> for ModelColor {
    fn from(color: Color) -> Self {
        let [r, g, b, a] = color.components;
        Self::new(r as f64, g as f64, b as f64, a as f64)
    }
}
