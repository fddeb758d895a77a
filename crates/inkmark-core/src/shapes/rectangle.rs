//! Rectangle shape.

use crate::color::ModelColor;
use crate::geometry::PointExt;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Named corners of a rectangle.
///
/// `Origin` and `To` are stored; `OriginY` and `ToX` are the two corners
/// synthesized from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RectPoint {
    Origin,
    To,
    /// `(origin.x, to.y)`
    OriginY,
    /// `(to.x, origin.y)`
    ToX,
}

impl RectPoint {
    pub const ALL: [RectPoint; 4] = [
        RectPoint::Origin,
        RectPoint::To,
        RectPoint::OriginY,
        RectPoint::ToX,
    ];
}

/// An axis-aligned rectangle spanned by two diagonal corners.
///
/// The corners are not normalized: `origin` may lie right of or below `to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectModel {
    pub origin: Point,
    pub to: Point,
    pub color: ModelColor,
}

impl RectModel {
    pub fn new(origin: Point, to: Point, color: ModelColor) -> Self {
        Self { origin, to, color }
    }

    /// The normalized rectangle covered by the shape.
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(self.origin, self.to)
    }

    /// Position of a corner.
    pub fn value_for(&self, point: RectPoint) -> Point {
        match point {
            RectPoint::Origin => self.origin,
            RectPoint::To => self.to,
            RectPoint::OriginY => Point::new(self.origin.x, self.to.y),
            RectPoint::ToX => Point::new(self.to.x, self.origin.y),
        }
    }

    /// Copy with both corners translated.
    pub fn copy_moving(&self, delta: Vec2) -> Self {
        Self {
            origin: self.origin.moved_by(delta),
            to: self.to.moved_by(delta),
            color: self.color,
        }
    }

    /// Copy with one control point translated.
    ///
    /// Stored corners move by the full delta. A synthesized corner moves
    /// exactly one stored corner, along y only: `OriginY` shifts `origin.y`
    /// and `ToX` shifts `to.y`, while the other stored corner stays fixed.
    pub fn copy_moving_point(&self, point: RectPoint, delta: Vec2) -> Self {
        let vertical = Vec2::new(0.0, delta.y);
        let (origin, to) = match point {
            RectPoint::Origin => (self.origin.moved_by(delta), self.to),
            RectPoint::To => (self.origin, self.to.moved_by(delta)),
            RectPoint::OriginY => (self.origin.moved_by(vertical), self.to),
            RectPoint::ToX => (self.origin, self.to.moved_by(vertical)),
        };
        Self {
            origin,
            to,
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
