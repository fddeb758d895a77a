//! Shape models.
//!
//! Every model is an immutable value: mutations return a new copy.

mod arrow;
mod pen;
mod rectangle;

pub use arrow::{ArrowDimensions, ArrowModel, ArrowPoint};
pub use pen::PenModel;
pub use rectangle::{RectModel, RectPoint};

use crate::color::ModelColor;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// The kinds of shape a canvas stores, one sequence per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Arrow,
    Rect,
    Pen,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Arrow => "arrow",
            ShapeKind::Rect => "rect",
            ShapeKind::Pen => "pen",
        }
    }
}

/// A named control point of any shape kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlPoint {
    Arrow(ArrowPoint),
    Rect(RectPoint),
}

/// Any shape model, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShapeModel {
    Arrow(ArrowModel),
    Rect(RectModel),
    Pen(PenModel),
}

impl ShapeModel {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeModel::Arrow(_) => ShapeKind::Arrow,
            ShapeModel::Rect(_) => ShapeKind::Rect,
            ShapeModel::Pen(_) => ShapeKind::Pen,
        }
    }

    pub fn color(&self) -> ModelColor {
        match self {
            ShapeModel::Arrow(s) => s.color,
            ShapeModel::Rect(s) => s.color,
            ShapeModel::Pen(s) => s.color,
        }
    }

    pub fn copy_moving(&self, delta: Vec2) -> Self {
        match self {
            ShapeModel::Arrow(s) => ShapeModel::Arrow(s.copy_moving(delta)),
            ShapeModel::Rect(s) => ShapeModel::Rect(s.copy_moving(delta)),
            ShapeModel::Pen(s) => ShapeModel::Pen(s.copy_moving(delta)),
        }
    }

    /// Move one control point. Returns `None` if this kind has no such point.
    pub fn copy_moving_point(&self, point: ControlPoint, delta: Vec2) -> Option<Self> {
        match (self, point) {
            (ShapeModel::Arrow(s), ControlPoint::Arrow(p)) => {
                Some(ShapeModel::Arrow(s.copy_moving_point(p, delta)))
            }
            (ShapeModel::Rect(s), ControlPoint::Rect(p)) => {
                Some(ShapeModel::Rect(s.copy_moving_point(p, delta)))
            }
            _ => None,
        }
    }

    pub fn copy_with_color(&self, color: ModelColor) -> Self {
        match self {
            ShapeModel::Arrow(s) => ShapeModel::Arrow(s.copy_with_color(color)),
            ShapeModel::Rect(s) => ShapeModel::Rect(s.copy_with_color(color)),
            ShapeModel::Pen(s) => ShapeModel::Pen(s.copy_with_color(color)),
        }
    }
}

impl From<ArrowModel> for ShapeModel {
    fn from(model: ArrowModel) -> Self {
        ShapeModel::Arrow(model)
    }
}

impl From<RectModel> for ShapeModel {
    fn from(model: RectModel) -> Self {
        ShapeModel::Rect(model)
    }
}

impl From<PenModel> for ShapeModel {
    fn from(model: PenModel) -> Self {
        ShapeModel::Pen(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_kind_tagged_json() {
        let shape = ShapeModel::from(ArrowModel::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            ModelColor::YELLOW,
        ));
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["kind"], "arrow");
        assert_eq!(json["to"]["x"], 1.0);
        assert_eq!(json["color"]["alpha"], 1.0);

        let back: ShapeModel = serde_json::from_value(json).unwrap();
        assert_eq!(back, shape);
    }

    #[test]
    fn test_control_point_kind_mismatch() {
        let pen = ShapeModel::from(PenModel::new(vec![Point::ZERO], ModelColor::default()));
        assert!(pen
            .copy_moving_point(ControlPoint::Arrow(ArrowPoint::To), Vec2::new(1.0, 0.0))
            .is_none());

        let rect = ShapeModel::from(RectModel::new(Point::ZERO, Point::new(5.0, 5.0), ModelColor::default()));
        let moved = rect
            .copy_moving_point(ControlPoint::Rect(RectPoint::To), Vec2::new(1.0, 0.0))
            .unwrap();
        assert_eq!(moved.kind(), ShapeKind::Rect);
    }
}
