//! Arrow view: a filled, tapered arrow with a knob on each end.

use super::{KnobSet, ShapeUpdate, ShapeView, ViewState, render_selection};
use crate::color::ModelColor;
use crate::config::EditorConfig;
use crate::geometry::PointExt;
use crate::knob::Knob;
use crate::shapes::{ArrowModel, ArrowPoint, ControlPoint, ShapeKind, ShapeModel};
use crate::surface::{LayerId, LayerStyle, Surface};
use kurbo::{Affine, BezPath, Point, Shape as KurboShape};

/// Outline of an arrow: a straight shaft ending in a triangular head.
///
/// Built along the x axis from the origin, then rotated and translated onto
/// the model's endpoints.
pub fn arrow_path(model: &ArrowModel) -> BezPath {
    let length = model.length();
    let dims = model.dimensions();
    let tail_length = length - dims.head_length;
    let half_tail = dims.tail_width / 2.0;
    let half_head = dims.head_width / 2.0;

    let mut path = BezPath::new();
    path.move_to((0.0, half_tail));
    path.line_to((tail_length, half_tail));
    path.line_to((tail_length, half_head));
    path.line_to((length, 0.0));
    path.line_to((tail_length, -half_head));
    path.line_to((tail_length, -half_tail));
    path.line_to((0.0, -half_tail));
    path.close_path();

    let angle = model.origin.delta_to(model.to).atan2();
    path.apply_affine(Affine::translate(model.origin.to_vec2()) * Affine::rotate(angle));
    path
}

#[derive(Debug)]
pub struct ArrowView {
    state: ViewState<ArrowModel>,
    index: usize,
    layer: LayerId,
    knobs: KnobSet<ArrowPoint>,
}

impl ArrowView {
    pub fn new(state: ViewState<ArrowModel>, index: usize, config: &EditorConfig, surface: &mut dyn Surface) -> Self {
        let layer = surface.create_layer(LayerStyle::filled(state.model.color));
        let knobs = KnobSet::new(
            ArrowPoint::ALL.map(|p| (p, state.model.value_for(p))),
            config,
            surface,
        );
        let mut view = Self {
            state: state.clone(),
            index,
            layer,
            knobs,
        };
        view.render(&state, None, surface);
        view
    }

    pub fn state(&self) -> &ViewState<ArrowModel> {
        &self.state
    }

    fn transition(&mut self, state: ViewState<ArrowModel>, surface: &mut dyn Surface) -> Option<ShapeUpdate> {
        let old = std::mem::replace(&mut self.state, state.clone());
        self.render(&state, Some(&old), surface)
    }

    /// Push the difference between two states to the surface.
    ///
    /// Returns the model update when the model changed.
    pub fn render(
        &mut self,
        state: &ViewState<ArrowModel>,
        old: Option<&ViewState<ArrowModel>>,
        surface: &mut dyn Surface,
    ) -> Option<ShapeUpdate> {
        let old_model = old.map(|o| &o.model);
        let mut update = None;

        if old_model != Some(&state.model) {
            let moved = old_model.is_none_or(|m| m.origin != state.model.origin || m.to != state.model.to);
            if moved {
                surface.set_path(self.layer, arrow_path(&state.model));
                self.knobs.reposition(|p| state.model.value_for(p), surface);
            }
            if old_model.is_some_and(|m| m.color != state.model.color) {
                surface.set_style(self.layer, LayerStyle::filled(state.model.color));
            }
            update = Some(ShapeUpdate {
                index: self.index,
                shape: ShapeModel::Arrow(state.model.clone()),
            });
        }

        render_selection(
            &self.knobs,
            self.layer,
            state.is_selected,
            old.map(|o| o.is_selected),
            surface,
        );
        update
    }
}

impl ShapeView for ArrowView {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Arrow
    }

    fn model_index(&self) -> usize {
        self.index
    }

    fn shape(&self) -> ShapeModel {
        ShapeModel::Arrow(self.state.model.clone())
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
        arrow_path(&self.state.model).contains(point)
    }

    fn knob_at(&self, point: Point) -> Option<ControlPoint> {
        self.knobs.key_at(point).map(ControlPoint::Arrow)
    }

    fn knob(&self, point: ControlPoint) -> &Knob {
        match point {
            ControlPoint::Arrow(p) => self.knobs.get(p),
            other => panic!("arrow has no control point {:?}", other),
        }
    }

    fn dragged(&mut self, from: Point, to: Point, surface: &mut dyn Surface) -> Option<ShapeUpdate> {
        let state = ViewState {
            model: self.state.model.copy_moving(from.delta_to(to)),
            is_selected: self.state.is_selected,
        };
        self.transition(state, surface)
    }

    fn dragged_knob(
        &mut self,
        knob: ControlPoint,
        from: Point,
        to: Point,
        surface: &mut dyn Surface,
    ) -> Option<ShapeUpdate> {
        let ControlPoint::Arrow(point) = knob else {
            panic!("arrow has no control point {:?}", knob);
        };
        let state = ViewState {
            model: self.state.model.copy_moving_point(point, from.delta_to(to)),
            is_selected: self.state.is_selected,
        };
        self.transition(state, surface)
    }

    fn update_color(&mut self, color: ModelColor, surface: &mut dyn Surface) -> Option<ShapeUpdate> {
        let state = ViewState {
            model: self.state.model.copy_with_color(color),
            is_selected: self.state.is_selected,
        };
        self.transition(state, surface)
    }

    fn add_to(&mut self, surface: &mut dyn Surface) {
        surface.add_layer(self.layer, None);
        if self.state.is_selected {
            self.knobs.show(self.layer, surface);
        }
    }

    fn remove_from(&mut self, surface: &mut dyn Surface) {
        self.knobs.release(surface);
        surface.release_layer(self.layer);
    }
}
