//! Rectangle view: a stroked outline with a knob on every corner.

use super::{KnobSet, ShapeUpdate, ShapeView, ViewState, render_selection};
use crate::color::ModelColor;
use crate::config::EditorConfig;
use crate::geometry::PointExt;
use crate::knob::Knob;
use crate::shapes::{ControlPoint, RectModel, RectPoint, ShapeKind, ShapeModel};
use crate::surface::{LayerId, LayerStyle, Surface};
use kurbo::{BezPath, Point, Shape as KurboShape};

/// Outline of a rectangle, normalized so either corner may be the origin.
pub fn rect_path(model: &RectModel) -> BezPath {
    model.as_rect().to_path(0.1)
}

#[derive(Debug)]
pub struct RectView {
    state: ViewState<RectModel>,
    index: usize,
    layer: LayerId,
    line_width: f64,
    knobs: KnobSet<RectPoint>,
}

impl RectView {
    pub fn new(state: ViewState<RectModel>, index: usize, config: &EditorConfig, surface: &mut dyn Surface) -> Self {
        let line_width = config.rect_line_width;
        let layer = surface.create_layer(LayerStyle::stroked(state.model.color, line_width));
        let knobs = KnobSet::new(
            RectPoint::ALL.map(|p| (p, state.model.value_for(p))),
            config,
            surface,
        );
        let mut view = Self {
            state: state.clone(),
            index,
            layer,
            line_width,
            knobs,
        };
        view.render(&state, None, surface);
        view
    }

    pub fn state(&self) -> &ViewState<RectModel> {
        &self.state
    }

    fn transition(&mut self, state: ViewState<RectModel>, surface: &mut dyn Surface) -> Option<ShapeUpdate> {
        let old = std::mem::replace(&mut self.state, state.clone());
        self.render(&state, Some(&old), surface)
    }

    /// Push the difference between two states to the surface.
    pub fn render(
        &mut self,
        state: &ViewState<RectModel>,
        old: Option<&ViewState<RectModel>>,
        surface: &mut dyn Surface,
    ) -> Option<ShapeUpdate> {
        let old_model = old.map(|o| &o.model);
        let mut update = None;

        if old_model != Some(&state.model) {
            if old_model.is_none_or(|m| m.origin != state.model.origin || m.to != state.model.to) {
                surface.set_path(self.layer, rect_path(&state.model));
                self.knobs.reposition(|p| state.model.value_for(p), surface);
            }
            if old_model.is_some_and(|m| m.color != state.model.color) {
                surface.set_style(self.layer, LayerStyle::stroked(state.model.color, self.line_width));
            }
            update = Some(ShapeUpdate {
                index: self.index,
                shape: ShapeModel::Rect(state.model.clone()),
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

    fn with_model(&self, model: RectModel) -> ViewState<RectModel> {
        ViewState {
            model,
            is_selected: self.state.is_selected,
        }
    }
}

impl ShapeView for RectView {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rect
    }

    fn model_index(&self) -> usize {
        self.index
    }

    fn shape(&self) -> ShapeModel {
        ShapeModel::Rect(self.state.model.clone())
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

    /// Anywhere inside the outline counts, including the stroke itself.
    fn contains(&self, point: Point) -> bool {
        let half = self.line_width / 2.0;
        self.state.model.as_rect().inflate(half, half).contains(point)
    }

    fn knob_at(&self, point: Point) -> Option<ControlPoint> {
        self.knobs.key_at(point).map(ControlPoint::Rect)
    }

    fn knob(&self, point: ControlPoint) -> &Knob {
        match point {
            ControlPoint::Rect(p) => self.knobs.get(p),
            other => panic!("rectangle has no control point {:?}", other),
        }
    }

    fn dragged(&mut self, from: Point, to: Point, surface: &mut dyn Surface) -> Option<ShapeUpdate> {
        let state = self.with_model(self.state.model.copy_moving(from.delta_to(to)));
        self.transition(state, surface)
    }

    fn dragged_knob(
        &mut self,
        knob: ControlPoint,
        from: Point,
        to: Point,
        surface: &mut dyn Surface,
    ) -> Option<ShapeUpdate> {
        let ControlPoint::Rect(point) = knob else {
            panic!("rectangle has no control point {:?}", knob);
        };
        let state = self.with_model(self.state.model.copy_moving_point(point, from.delta_to(to)));
        self.transition(state, surface)
    }

    fn update_color(&mut self, color: ModelColor, surface: &mut dyn Surface) -> Option<ShapeUpdate> {
        let state = self.with_model(self.state.model.copy_with_color(color));
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
