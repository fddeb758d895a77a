//! Creation tools: which kind of shape a gesture on empty canvas makes.

use crate::color::ModelColor;
use crate::config::CreationThresholds;
use crate::shapes::{ArrowModel, ArrowPoint, ControlPoint, PenModel, RectModel, RectPoint, ShapeKind, ShapeModel};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// The active creation tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreateMode {
    #[default]
    Arrow,
    Rect,
    Pen,
}

/// A shape produced by a drag on empty canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Creation {
    pub shape: ShapeModel,
    /// Control point that keeps following the pointer, if any.
    pub knob: Option<ControlPoint>,
}

impl CreateMode {
    pub const ALL: [CreateMode; 3] = [CreateMode::Arrow, CreateMode::Rect, CreateMode::Pen];

    pub fn kind(self) -> ShapeKind {
        match self {
            CreateMode::Arrow => ShapeKind::Arrow,
            CreateMode::Rect => ShapeKind::Rect,
            CreateMode::Pen => ShapeKind::Pen,
        }
    }

    /// Shape created by a plain click. None of the geometric tools create on click.
    pub fn create_on_click(self, _point: Point, _color: ModelColor) -> Option<ShapeModel> {
        None
    }

    /// Shape created by dragging from `from` to `to`, or `None` when the
    /// drag is shorter than the tool's minimum distance.
    pub fn create_on_drag(
        self,
        from: Point,
        to: Point,
        color: ModelColor,
        thresholds: &CreationThresholds,
    ) -> Option<Creation> {
        let min = thresholds.for_kind(self.kind());
        if from.distance(to) < min {
            log::trace!("{} drag of {:.1} below {}", self.kind().name(), from.distance(to), min);
            return None;
        }
        let creation = match self {
            CreateMode::Arrow => Creation {
                shape: ArrowModel::new(from, to, color).into(),
                knob: Some(ControlPoint::Arrow(ArrowPoint::To)),
            },
            CreateMode::Rect => Creation {
                shape: RectModel::new(from, to, color).into(),
                knob: Some(ControlPoint::Rect(RectPoint::To)),
            },
            CreateMode::Pen => Creation {
                shape: PenModel::new(vec![from, to], color).into(),
                knob: None,
            },
        };
        Some(creation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_rect_drag_rejected() {
        let thresholds = CreationThresholds::default();
        let created = CreateMode::Rect.create_on_drag(Point::ZERO, Point::new(2.0, 0.0), ModelColor::default(), &thresholds);
        assert!(created.is_none());
    }

    #[test]
    fn test_arrow_drag_tracks_tip() {
        let thresholds = CreationThresholds::default();
        let created = CreateMode::Arrow
            .create_on_drag(Point::ZERO, Point::new(100.0, 0.0), ModelColor::GREEN, &thresholds)
            .unwrap();
        assert_eq!(created.knob, Some(ControlPoint::Arrow(ArrowPoint::To)));
        assert_eq!(
            created.shape,
            ShapeModel::Arrow(ArrowModel::new(Point::ZERO, Point::new(100.0, 0.0), ModelColor::GREEN))
        );
    }

    #[test]
    fn test_pen_drag_has_no_knob() {
        let thresholds = CreationThresholds::default();
        let created = CreateMode::Pen
            .create_on_drag(Point::ZERO, Point::new(1.5, 0.0), ModelColor::default(), &thresholds)
            .unwrap();
        assert_eq!(created.knob, None);
        assert_eq!(created.shape.kind(), ShapeKind::Pen);
    }

    #[test]
    fn test_click_creates_nothing() {
        for mode in CreateMode::ALL {
            assert!(mode.create_on_click(Point::ZERO, ModelColor::default()).is_none());
        }
    }
}
