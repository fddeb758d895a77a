//! Headless editing session.

use inkmark_core::{CanvasModel, CreateMode, EditableCanvas, EditorConfig, MemorySurface, PointerEvent};
use inkmark_render::{RenderContext, Renderer, RendererError, SvgRenderer};
use kurbo::Size;
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

/// Padding around the drawing in exported SVG.
const SVG_PADDING: f64 = 20.0;

/// Fallback SVG size for an empty document.
const EMPTY_SVG_SIZE: Size = Size::new(640.0, 480.0);

pub struct Session {
    canvas: EditableCanvas<MemorySurface>,
    notifications: Rc<Cell<usize>>,
}

impl Session {
    pub fn new(config: EditorConfig, model: CanvasModel, mode: CreateMode) -> Self {
        let mut canvas = EditableCanvas::with_model(MemorySurface::new(), config, model);
        canvas.set_create_mode(mode);

        let notifications = Rc::new(Cell::new(0));
        let counter = notifications.clone();
        canvas.set_delegate(move |model: &CanvasModel| {
            counter.set(counter.get() + 1);
            log::info!(
                "Document updated: {} arrows, {} rectangles, {} pen strokes",
                model.arrows.len(),
                model.rects.len(),
                model.pens.len()
            );
        });

        Self { canvas, notifications }
    }

    pub fn canvas(&self) -> &EditableCanvas<MemorySurface> {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut EditableCanvas<MemorySurface> {
        &mut self.canvas
    }

    pub fn model(&self) -> &CanvasModel {
        self.canvas.model()
    }

    /// Number of document updates reported so far.
    pub fn notifications(&self) -> usize {
        self.notifications.get()
    }

    /// Feed recorded events to the canvas. Returns how many document updates they produced.
    pub fn replay(&mut self, events: &[PointerEvent]) -> usize {
        let before = self.notifications();
        for event in events {
            self.canvas.handle_pointer_event(*event);
        }
        self.notifications() - before
    }

    fn rendered(&self) -> Result<SvgRenderer, RendererError> {
        let ctx = RenderContext::new(self.canvas.surface(), EMPTY_SVG_SIZE).fit_to_content(SVG_PADDING);
        let mut renderer = SvgRenderer::new();
        renderer.build_scene(&ctx)?;
        Ok(renderer)
    }

    /// Render the current surface as SVG, framed around the drawing.
    pub fn render_svg(&self) -> Result<String, RendererError> {
        Ok(self.rendered()?.into_svg())
    }

    pub fn write_svg(&self, path: &Path) -> Result<(), RendererError> {
        self.rendered()?.write_to(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn gesture(points: &[(f64, f64)]) -> Vec<PointerEvent> {
        let points: Vec<_> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
        PointerEvent::gesture(&points)
    }

    #[test]
    fn test_replay_counts_updates() {
        let mut session = Session::new(EditorConfig::default(), CanvasModel::new(), CreateMode::Rect);
        let mut events = gesture(&[(0.0, 0.0), (80.0, 40.0)]);
        // Too short to create anything
        events.extend(gesture(&[(200.0, 200.0), (201.0, 200.0)]));

        assert_eq!(session.replay(&events), 1);
        assert_eq!(session.model().rects.len(), 1);
        assert_eq!(session.notifications(), 1);
    }

    #[test]
    fn test_svg_export() {
        let mut session = Session::new(EditorConfig::default(), CanvasModel::new(), CreateMode::Arrow);
        session.replay(&gesture(&[(0.0, 0.0), (120.0, 0.0)]));
        session.canvas_mut().deselect_all();

        let svg = session.render_svg().unwrap();
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(svg.contains(r#"fill="rgb(255,74,1)""#));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        session.write_svg(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), svg);
    }

    #[test]
    fn test_demo_scripts() {
        let arrow = PointerEvent::parse_script(include_str!("../../../demos/arrow-and-tip.json")).unwrap();
        let mut session = Session::new(EditorConfig::default(), CanvasModel::new(), CreateMode::Arrow);
        assert_eq!(session.replay(&arrow), 2);
        assert_eq!(session.model().arrows[0].origin, Point::new(40.0, 40.0));
        assert_eq!(session.model().arrows[0].to, Point::new(170.0, 90.0));

        let stroke = PointerEvent::parse_script(include_str!("../../../demos/freehand.json")).unwrap();
        let mut session = Session::new(EditorConfig::default(), CanvasModel::new(), CreateMode::Pen);
        assert_eq!(session.replay(&stroke), 1);
        assert_eq!(session.model().pens[0].len(), 6);
    }
}
