//! Pen view: a stroked polyline. Strokes have no knobs.

use super::{ShapeUpdate, ShapeView, ViewState};
use crate::color::ModelColor;
use crate::config::EditorConfig;
use crate::geometry::{PointExt, point_to_polyline_dist};
use crate::knob::Knob;
use crate::shapes::{ControlPoint, PenModel, ShapeKind, ShapeModel};
use crate::surface::{LayerId, LayerStyle, Surface};
use kurbo::{BezPath, Point};

/// Polyline through the stroke's points. A single point yields a zero-length segment.
pub fn pen_path(model: &PenModel) -> BezPath {
    let mut path = BezPath::new();
    let Some((first, rest)) = model.points.split_first() else {
        return path;
    };
    path.move_to(*first);
    if rest.is_empty() {
        path.line_to(*first);
    }
    for point in rest {
        path.line_to(*point);
    }
    path
}

#[derive(Debug)]
pub struct PenView {
    state: ViewState<PenModel>,
    index: usize,
    layer: LayerId,
    line_width: f64,
    hit_tolerance: f64,
}

impl PenView {
    pub fn new(state: ViewState<PenModel>, index: usize, config: &EditorConfig, surface: &mut dyn Surface) -> Self {
        let line_width = config.pen_line_width;
        let layer = surface.create_layer(LayerStyle::stroked(state.model.color, line_width));
        let mut view = Self {
            state: state.clone(),
            index,
            layer,
            line_width,
            hit_tolerance: config.hit_tolerance,
        };
        view.render(&state, None, surface);
        view
    }

    pub fn state(&self) -> &ViewState<PenModel> {
        &self.state
    }

    fn transition(&mut self, state: ViewState<PenModel>, surface: &mut dyn Surface) -> Option<ShapeUpdate> {
        let old = std::mem::replace(&mut self.state, state.clone());
        self.render(&state, Some(&old), surface)
    }

    /// Push the difference between two states to the surface.
    pub fn render(
        &mut self,
        state: &ViewState<PenModel>,
        old: Option<&ViewState<PenModel>>,
        surface: &mut dyn Surface,
    ) -> Option<ShapeUpdate> {
        let old_model = old.map(|o| &o.model);
        if old_model == Some(&state.model) {
            return None;
        }

        if old_model.is_none_or(|m| m.points != state.model.points) {
            surface.set_path(self.layer, pen_path(&state.model));
        }
        if old_model.is_some_and(|m| m.color != state.model.color) {
            surface.set_style(self.layer, LayerStyle::stroked(state.model.color, self.line_width));
        }
        Some(ShapeUpdate {
            index: self.index,
            shape: ShapeModel::Pen(state.model.clone()),
        })
    }

    fn with_model(&self, model: PenModel) -> ViewState<PenModel> {
        ViewState {
            model,
            is_selected: self.state.is_selected,
        }
    }
}

impl ShapeView for PenView {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Pen
    }

    fn model_index(&self) -> usize {
        self.index
    }

    fn shape(&self) -> ShapeModel {
        ShapeModel::Pen(self.state.model.clone())
    }

    fn layer(&self) -> LayerId {
        self.layer
    }

    fn is_selected(&self) -> bool {
        self.state.is_selected
    }

    fn set_selected(&mut self, selected: bool, surface: &mut dyn Surface) {
        let state = ViewState {
            model: self.state.model.clone(),
            is_selected: selected,
        };
        self.transition(state, surface);
    }

    fn contains(&self, point: Point) -> bool {
        point_to_polyline_dist(point, &self.state.model.points) <= self.line_width / 2.0 + self.hit_tolerance
    }

    fn knob_at(&self, _point: Point) -> Option<ControlPoint> {
        None
    }

    fn knob(&self, point: ControlPoint) -> &Knob {
        panic!("pen stroke has no control point {:?}", point)
    }

    fn dragged(&mut self, from: Point, to: Point, surface: &mut dyn Surface) -> Option<ShapeUpdate> {
        let state = self.with_model(self.state.model.copy_moving(from.delta_to(to)));
        self.transition(state, surface)
    }

    fn dragged_knob(
        &mut self,
        knob: ControlPoint,
        _from: Point,
        _to: Point,
        _surface: &mut dyn Surface,
    ) -> Option<ShapeUpdate> {
        panic!("pen stroke has no control point {:?}", knob)
    }

    fn update_color(&mut self, color: ModelColor, surface: &mut dyn Surface) -> Option<ShapeUpdate> {
        let state = self.with_model(self.state.model.copy_with_color(color));
        self.transition(state, surface)
    }

    fn extend_stroke(&mut self, point: Point, surface: &mut dyn Surface) -> Option<ShapeUpdate> {
        let state = self.with_model(self.state.model.copy_appending(point));
        self.transition(state, surface)
    }

    fn add_to(&mut self, surface: &mut dyn Surface) {
        surface.add_layer(self.layer, None);
    }

    fn remove_from(&mut self, surface: &mut dyn Surface) {
        surface.release_layer(self.layer);
    }
}
