//! Knobs: small draggable handles bound to a shape's control points.

use crate::color::ModelColor;
use crate::config::EditorConfig;
use crate::surface::{LayerId, LayerStyle, Surface};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Size};

const KNOB_OUTLINE: ModelColor = ModelColor::new(0.25, 0.25, 0.25, 1.0);

/// What a knob displays: the position of its control point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobState {
    pub model: Point,
}

/// A hit-testable handle anchored on one control point.
///
/// Knobs are owned by their shape view and know nothing about it; the view
/// keeps the mapping from control point to knob.
#[derive(Debug)]
pub struct Knob {
    state: KnobState,
    layer: LayerId,
    size: f64,
    hit_radius: f64,
}

impl Knob {
    /// Create a knob and its (detached) layer.
    pub fn new(model: Point, config: &EditorConfig, surface: &mut dyn Surface) -> Self {
        let style = LayerStyle {
            fill: Some(config.knob_color),
            stroke: Some(KNOB_OUTLINE),
            line_width: 1.0,
        };
        let layer = surface.create_layer(style);
        let mut knob = Self {
            state: KnobState { model },
            layer,
            size: config.knob_size,
            hit_radius: config.knob_hit_radius,
        };
        let state = knob.state;
        knob.render(&state, None, surface);
        knob
    }

    pub fn state(&self) -> KnobState {
        self.state
    }

    /// Anchor position.
    pub fn point(&self) -> Point {
        self.state.model
    }

    pub fn layer(&self) -> LayerId {
        self.layer
    }

    /// Check if a point hits this knob.
    pub fn contains(&self, point: Point) -> bool {
        let dx = point.x - self.state.model.x;
        let dy = point.y - self.state.model.y;
        dx * dx + dy * dy <= self.hit_radius * self.hit_radius
    }

    /// Install a new state and render the difference.
    pub fn set_state(&mut self, state: KnobState, surface: &mut dyn Surface) {
        let old = std::mem::replace(&mut self.state, state);
        self.render(&state, Some(&old), surface);
    }

    /// Reposition the visual when the anchor moved.
    pub fn render(&mut self, state: &KnobState, old: Option<&KnobState>, surface: &mut dyn Surface) {
        if old.map(|o| o.model) != Some(state.model) {
            surface.set_path(self.layer, self.path_for(state.model));
        }
    }

    fn path_for(&self, center: Point) -> BezPath {
        Rect::from_center_size(center, Size::new(self.size, self.size)).to_path(0.1)
    }

    /// Attach the knob visual on top of `parent`.
    pub fn show(&self, parent: LayerId, surface: &mut dyn Surface) {
        surface.add_layer(self.layer, Some(parent));
    }

    /// Detach the knob visual.
    pub fn hide(&self, surface: &mut dyn Surface) {
        surface.remove_layer(self.layer);
    }

    /// Drop the knob's layer from the surface.
    pub fn release(&self, surface: &mut dyn Surface) {
        surface.release_layer(self.layer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    #[test]
    fn test_knob_hit_test() {
        let mut surface = MemorySurface::new();
        let knob = Knob::new(Point::new(50.0, 50.0), &EditorConfig::default(), &mut surface);

        assert!(knob.contains(Point::new(50.0, 50.0)));
        assert!(knob.contains(Point::new(55.0, 55.0)));
        assert!(!knob.contains(Point::new(70.0, 70.0)));
    }

    #[test]
    fn test_knob_repositions_only_on_change() {
        let mut surface = MemorySurface::new();
        let mut knob = Knob::new(Point::new(0.0, 0.0), &EditorConfig::default(), &mut surface);
        let before = surface.operations();

        knob.set_state(KnobState { model: Point::new(0.0, 0.0) }, &mut surface);
        assert_eq!(surface.operations(), before);

        knob.set_state(KnobState { model: Point::new(20.0, 0.0) }, &mut surface);
        assert_eq!(surface.operations(), before + 1);
        assert!(knob.contains(Point::new(20.0, 0.0)));
        assert!(!knob.contains(Point::new(0.0, 0.0)));

        let bounds = surface.layer(knob.layer()).unwrap().path.bounding_box();
        assert!((bounds.center().x - 20.0).abs() < 1e-9);
    }
}
