//! Arrow shape.

use crate::color::ModelColor;
use crate::geometry::PointExt;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Named control points of an arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrowPoint {
    /// Tail of the arrow.
    Origin,
    /// Tip of the arrowhead.
    To,
}

impl ArrowPoint {
    pub const ALL: [ArrowPoint; 2] = [ArrowPoint::Origin, ArrowPoint::To];
}

/// Below this shaft length the head takes up the whole arrow.
const HEAD_LENGTH_THRESHOLD: f64 = 20.0;

/// Widths and head length derived from an arrow's length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowDimensions {
    pub tail_width: f64,
    pub head_width: f64,
    pub head_length: f64,
}

impl ArrowDimensions {
    /// Proportions for an arrow of the given length.
    ///
    /// Short arrows use their full length as head length so the head never
    /// overshoots the tail.
    pub fn for_length(length: f64) -> Self {
        Self {
            tail_width: 5.0 + length / 45.0,
            head_width: 15.0 + length / 15.0,
            head_length: if length >= HEAD_LENGTH_THRESHOLD {
                HEAD_LENGTH_THRESHOLD + length / 15.0
            } else {
                length
            },
        }
    }
}

/// An arrow from `origin` to `to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowModel {
    pub origin: Point,
    pub to: Point,
    pub color: ModelColor,
}

impl ArrowModel {
    pub fn new(origin: Point, to: Point, color: ModelColor) -> Self {
        Self { origin, to, color }
    }

    /// Length of the arrow from tail to tip.
    pub fn length(&self) -> f64 {
        self.origin.distance(self.to)
    }

    pub fn dimensions(&self) -> ArrowDimensions {
        ArrowDimensions::for_length(self.length())
    }

    /// Position of a control point.
    pub fn value_for(&self, point: ArrowPoint) -> Point {
        match point {
            ArrowPoint::Origin => self.origin,
            ArrowPoint::To => self.to,
        }
    }

    /// Copy with both endpoints translated.
    pub fn copy_moving(&self, delta: Vec2) -> Self {
        Self {
            origin: self.origin.moved_by(delta),
            to: self.to.moved_by(delta),
            color: self.color,
        }
    }

    /// Copy with a single endpoint translated.
    pub fn copy_moving_point(&self, point: ArrowPoint, delta: Vec2) -> Self {
        match point {
            ArrowPoint::Origin => Self {
                origin: self.origin.moved_by(delta),
                ..self.clone()
            },
            ArrowPoint::To => Self {
                to: self.to.moved_by(delta),
                ..self.clone()
            },
        }
    }

    pub fn copy_with_color(&self, color: ModelColor) -> Self {
        Self {
            color,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrow() -> ArrowModel {
        ArrowModel::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), ModelColor::default())
    }

    #[test]
    fn test_dimensions_long_arrow() {
        let dims = arrow().dimensions();
        assert!((dims.head_length - (20.0 + 100.0 / 15.0)).abs() < 1e-9);
        assert!((dims.head_length - 26.67).abs() < 0.01);
        assert!((dims.tail_width - (5.0 + 100.0 / 45.0)).abs() < 1e-9);
        assert!((dims.head_width - (15.0 + 100.0 / 15.0)).abs() < 1e-9);
    }

    #[test]
    fn test_dimensions_short_arrow() {
        let dims = ArrowDimensions::for_length(12.0);
        assert!((dims.head_length - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_copy_moving() {
        let moved = arrow().copy_moving(Vec2::new(5.0, -5.0));
        assert_eq!(moved.origin, Point::new(5.0, -5.0));
        assert_eq!(moved.to, Point::new(105.0, -5.0));
        assert_eq!(moved.color, arrow().color);
    }

    #[test]
    fn test_copy_moving_point_only_touches_one_end() {
        let original = arrow();
        let moved = original.copy_moving_point(ArrowPoint::To, Vec2::new(50.0, 0.0));
        assert_eq!(moved.origin, original.origin);
        assert_eq!(moved.to, Point::new(150.0, 0.0));

        let moved = original.copy_moving_point(ArrowPoint::Origin, Vec2::new(0.0, 3.0));
        assert_eq!(moved.origin, Point::new(0.0, 3.0));
        assert_eq!(moved.to, original.to);
    }

    #[test]
    fn test_copy_with_color_keeps_geometry() {
        let recolored = arrow().copy_with_color(ModelColor::VIOLET);
        assert_eq!(recolored.color, ModelColor::VIOLET);
        assert_eq!(recolored.origin, arrow().origin);
        assert_ne!(recolored, arrow());
    }
}
