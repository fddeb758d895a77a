//! Freehand pen stroke.

use crate::color::ModelColor;
use crate::geometry::PointExt;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// A freehand stroke through an ordered series of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenModel {
    pub points: Vec<Point>,
    pub color: ModelColor,
}

impl PenModel {
    pub fn new(points: Vec<Point>, color: ModelColor) -> Self {
        Self { points, color }
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Copy with every point translated.
    pub fn copy_moving(&self, delta: Vec2) -> Self {
        Self {
            points: self.points.iter().map(|p| p.moved_by(delta)).collect(),
            color: self.color,
        }
    }

    /// Copy with `point` appended to the end of the stroke.
    pub fn copy_appending(&self, point: Point) -> Self {
        let mut points = Vec::with_capacity(self.points.len() + 1);
        points.extend_from_slice(&self.points);
        points.push(point);
        Self {
            points,
            color: self.color,
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

    fn stroke() -> PenModel {
        PenModel::new(
            vec![Point::new(0.0, 0.0), Point::new(100.0, 50.0), Point::new(50.0, 100.0)],
            ModelColor::GREEN,
        )
    }

    #[test]
    fn test_copy_moving_translates_every_point() {
        let moved = stroke().copy_moving(Vec2::new(10.0, -10.0));
        assert_eq!(moved.len(), 3);
        assert_eq!(moved.points[1], Point::new(110.0, 40.0));
        assert_eq!(moved.color, ModelColor::GREEN);
    }

    #[test]
    fn test_copy_appending_leaves_original() {
        let original = stroke();
        let longer = original.copy_appending(Point::new(0.0, 100.0));
        assert_eq!(original.len(), 3);
        assert_eq!(longer.len(), 4);
        assert_eq!(longer.points.last(), Some(&Point::new(0.0, 100.0)));
    }
}
