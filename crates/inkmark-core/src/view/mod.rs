//! Shape views: the live, selectable projection of one shape model.
//!
//! A view pairs a model with a selection flag ([`ViewState`]), owns the
//! shape's layer and knobs on the [`Surface`], and redraws only what changed
//! between two states. Every mutation builds a new state and passes old and
//! new to the view's `render`.

mod arrow;
mod pen;
mod rectangle;

pub use arrow::{ArrowView, arrow_path};
pub use pen::{PenView, pen_path};
pub use rectangle::{RectView, rect_path};

use crate::color::ModelColor;
use crate::config::EditorConfig;
use crate::knob::{Knob, KnobState};
use crate::shapes::{ControlPoint, ShapeKind, ShapeModel};
use crate::surface::{LayerId, Surface};
use kurbo::Point;
use std::fmt::Debug;

/// A shape model together with its selection flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<M> {
    pub model: M,
    pub is_selected: bool,
}

impl<M> ViewState<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            is_selected: false,
        }
    }
}

/// A committed geometry or color change, tagged with the model index it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeUpdate {
    pub index: usize,
    pub shape: ShapeModel,
}

/// Behavior shared by every kind of shape view.
pub trait ShapeView: Debug {
    fn kind(&self) -> ShapeKind;

    /// Index of the model within its kind's sequence in the canvas model.
    fn model_index(&self) -> usize;

    /// The current model.
    fn shape(&self) -> ShapeModel;

    /// The shape's own layer.
    fn layer(&self) -> LayerId;

    fn is_selected(&self) -> bool;

    /// Select or deselect, showing or hiding the knobs.
    fn set_selected(&mut self, selected: bool, surface: &mut dyn Surface);

    /// Check if a point hits the shape.
    fn contains(&self, point: Point) -> bool;

    /// The control point whose knob is under `point`, if any.
    fn knob_at(&self, point: Point) -> Option<ControlPoint>;

    /// The knob bound to a control point.
    ///
    /// # Panics
    /// If this kind of shape has no such control point.
    fn knob(&self, point: ControlPoint) -> &Knob;

    /// Move the whole shape by `to - from`.
    fn dragged(&mut self, from: Point, to: Point, surface: &mut dyn Surface) -> Option<ShapeUpdate>;

    /// Move one control point by `to - from`.
    ///
    /// # Panics
    /// If this kind of shape has no such control point.
    fn dragged_knob(
        &mut self,
        knob: ControlPoint,
        from: Point,
        to: Point,
        surface: &mut dyn Surface,
    ) -> Option<ShapeUpdate>;

    /// Replace the shape's color.
    fn update_color(&mut self, color: ModelColor, surface: &mut dyn Surface) -> Option<ShapeUpdate>;

    /// Continue a freehand gesture through `point`. Shapes that are not strokes ignore it.
    fn extend_stroke(&mut self, _point: Point, _surface: &mut dyn Surface) -> Option<ShapeUpdate> {
        None
    }

    /// One-time setup after a view created by a click lands on the canvas.
    fn initial_setup(&mut self, _surface: &mut dyn Surface) {}

    /// Attach the shape's layer to the surface.
    fn add_to(&mut self, surface: &mut dyn Surface);

    /// Detach and release the shape's layer and every knob.
    fn remove_from(&mut self, surface: &mut dyn Surface);
}

/// Build the view matching a model's kind. The view starts unselected and is
/// not yet attached to the surface.
pub fn make_view(
    shape: ShapeModel,
    index: usize,
    config: &EditorConfig,
    surface: &mut dyn Surface,
) -> Box<dyn ShapeView> {
    match shape {
        ShapeModel::Arrow(model) => Box::new(ArrowView::new(ViewState::new(model), index, config, surface)),
        ShapeModel::Rect(model) => Box::new(RectView::new(ViewState::new(model), index, config, surface)),
        ShapeModel::Pen(model) => Box::new(PenView::new(ViewState::new(model), index, config, surface)),
    }
}

/// Knobs of one view, keyed by control point.
#[derive(Debug)]
pub(crate) struct KnobSet<K> {
    knobs: Vec<(K, Knob)>,
}

impl<K: Copy + Eq + Debug> KnobSet<K> {
    pub(crate) fn new(
        points: impl IntoIterator<Item = (K, Point)>,
        config: &EditorConfig,
        surface: &mut dyn Surface,
    ) -> Self {
        let knobs = points
            .into_iter()
            .map(|(key, point)| (key, Knob::new(point, config, surface)))
            .collect();
        Self { knobs }
    }

    pub(crate) fn get(&self, key: K) -> &Knob {
        match self.knobs.iter().find(|(k, _)| *k == key) {
            Some((_, knob)) => knob,
            None => panic!("no knob registered for control point {:?}", key),
        }
    }

    pub(crate) fn key_at(&self, point: Point) -> Option<K> {
        self.knobs
            .iter()
            .find(|(_, knob)| knob.contains(point))
            .map(|(key, _)| *key)
    }

    /// Move every knob onto its control point's current value.
    pub(crate) fn reposition(&mut self, value_for: impl Fn(K) -> Point, surface: &mut dyn Surface) {
        for (key, knob) in &mut self.knobs {
            knob.set_state(KnobState { model: value_for(*key) }, surface);
        }
    }

    pub(crate) fn show(&self, parent: LayerId, surface: &mut dyn Surface) {
        for (_, knob) in &self.knobs {
            knob.show(parent, surface);
        }
    }

    pub(crate) fn hide(&self, surface: &mut dyn Surface) {
        for (_, knob) in &self.knobs {
            knob.hide(surface);
        }
    }

    pub(crate) fn release(&self, surface: &mut dyn Surface) {
        for (_, knob) in &self.knobs {
            knob.release(surface);
        }
    }
}

/// Apply the selection half of a render diff.
pub(crate) fn render_selection<K: Copy + Eq + Debug>(
    knobs: &KnobSet<K>,
    parent: LayerId,
    selected: bool,
    old_selected: Option<bool>,
    surface: &mut dyn Surface,
) {
    match old_selected {
        Some(old) if old == selected => {}
        // Fresh views start with detached knobs
        None if !selected => {}
        _ if selected => knobs.show(parent, surface),
        _ => knobs.hide(surface),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ArrowModel, PenModel, RectModel};
    use crate::surface::MemorySurface;

    #[test]
    fn test_make_view_dispatches_on_kind() {
        let mut surface = MemorySurface::new();
        let config = EditorConfig::default();
        let shapes = [
            ShapeModel::from(ArrowModel::new(Point::ZERO, Point::new(50.0, 0.0), ModelColor::default())),
            ShapeModel::from(RectModel::new(Point::ZERO, Point::new(50.0, 50.0), ModelColor::default())),
            ShapeModel::from(PenModel::new(vec![Point::ZERO, Point::new(9.0, 9.0)], ModelColor::default())),
        ];
        for (index, shape) in shapes.into_iter().enumerate() {
            let view = make_view(shape.clone(), index, &config, &mut surface);
            assert_eq!(view.kind(), shape.kind());
            assert_eq!(view.shape(), shape);
            assert_eq!(view.model_index(), index);
            assert!(!view.is_selected());
        }
    }

    #[test]
    fn test_contains_is_translation_invariant() {
        let mut surface = MemorySurface::new();
        let config = EditorConfig::default();
        let delta = kurbo::Vec2::new(37.0, -12.5);
        let shapes = [
            ShapeModel::from(ArrowModel::new(Point::new(10.0, 10.0), Point::new(90.0, 60.0), ModelColor::default())),
            ShapeModel::from(RectModel::new(Point::new(20.0, 15.0), Point::new(70.0, 80.0), ModelColor::default())),
            ShapeModel::from(PenModel::new(
                vec![Point::new(5.0, 5.0), Point::new(50.0, 40.0), Point::new(95.0, 20.0)],
                ModelColor::default(),
            )),
        ];
        for shape in shapes {
            let view = make_view(shape.clone(), 0, &config, &mut surface);
            let moved = make_view(shape.copy_moving(delta), 0, &config, &mut surface);
            // Offset off the integer grid so no sample sits on an edge or vertex
            for x in (0..=100).step_by(5) {
                for y in (0..=100).step_by(5) {
                    let p = Point::new(x as f64 + 0.37, y as f64 + 0.61);
                    assert_eq!(view.contains(p), moved.contains(p + delta), "{:?} at {:?}", shape.kind(), p);
                }
            }
        }
    }

    #[test]
    #[should_panic(expected = "no knob registered")]
    fn test_missing_knob_panics() {
        let mut surface = MemorySurface::new();
        let knobs = KnobSet::new([(1u8, Point::ZERO)], &EditorConfig::default(), &mut surface);
        knobs.get(2);
    }
}
