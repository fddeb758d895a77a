//! The editable canvas: pointer gestures in, document changes out.
//!
//! [`EditableCanvas`] owns the document, one view per shape, the single
//! selection slot (a shape or a text annotation, never both) and the state
//! of the current drag. Completed gestures that changed the document are
//! reported to a [`CanvasDelegate`].

use crate::canvas::{CanvasModel, ModelError};
use crate::color::ModelColor;
use crate::config::EditorConfig;
use crate::input::PointerEvent;
use crate::shapes::{ControlPoint, ShapeModel};
use crate::surface::Surface;
use crate::tools::CreateMode;
use crate::view::{ShapeUpdate, ShapeView, make_view};
use kurbo::Point;

/// What the current pointer gesture is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// A shape was just created by this gesture. With a knob, the knob
    /// follows the pointer; without one the stroke grows along it.
    DraggingNewShape(Option<ControlPoint>),
    DraggingShape,
    DraggingKnob(ControlPoint),
}

/// Receives the document after every gesture that changed it.
pub trait CanvasDelegate {
    fn on_model_updated(&mut self, model: &CanvasModel);
}

impl<F: FnMut(&CanvasModel)> CanvasDelegate for F {
    fn on_model_updated(&mut self, model: &CanvasModel) {
        self(model)
    }
}

/// A text annotation living next to the shapes, managed elsewhere.
pub trait TextAnnotation {
    fn delete(&mut self);
    fn deselect(&mut self);
    fn is_selected(&self) -> bool;
}

/// Pointer-driven editor over a [`Surface`].
pub struct EditableCanvas<S: Surface> {
    surface: S,
    model: CanvasModel,
    /// Views in the order they were added, bottom to top.
    views: Vec<Box<dyn ShapeView>>,
    selected: Option<usize>,
    selected_text: Option<Box<dyn TextAnnotation>>,
    drag: DragState,
    last_dragged_point: Option<Point>,
    is_changed: bool,
    create_mode: CreateMode,
    create_color: ModelColor,
    user_interaction_enabled: bool,
    config: EditorConfig,
    delegate: Option<Box<dyn CanvasDelegate>>,
}

impl<S: Surface> EditableCanvas<S> {
    pub fn new(surface: S, config: EditorConfig) -> Self {
        Self {
            surface,
            model: CanvasModel::new(),
            views: Vec::new(),
            selected: None,
            selected_text: None,
            drag: DragState::Idle,
            last_dragged_point: None,
            is_changed: false,
            create_mode: CreateMode::default(),
            create_color: config.create_color,
            user_interaction_enabled: true,
            config,
            delegate: None,
        }
    }

    /// Create an editor showing an existing document.
    pub fn with_model(surface: S, config: EditorConfig, model: CanvasModel) -> Self {
        let mut canvas = Self::new(surface, config);
        canvas.update(model);
        canvas
    }

    pub fn set_delegate(&mut self, delegate: impl CanvasDelegate + 'static) {
        self.delegate = Some(Box::new(delegate));
    }

    pub fn model(&self) -> &CanvasModel {
        &self.model
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn views(&self) -> impl Iterator<Item = &dyn ShapeView> {
        self.views.iter().map(|v| v.as_ref())
    }

    pub fn selected_view(&self) -> Option<&dyn ShapeView> {
        self.selected.map(|i| self.views[i].as_ref())
    }

    pub fn selected_shape(&self) -> Option<ShapeModel> {
        self.selected_view().map(|v| v.shape())
    }

    pub fn has_selected_text(&self) -> bool {
        self.selected_text.is_some()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Control point following the pointer, if any.
    pub fn selected_knob(&self) -> Option<ControlPoint> {
        match self.drag {
            DragState::DraggingKnob(knob) | DragState::DraggingNewShape(Some(knob)) => Some(knob),
            _ => None,
        }
    }

    pub fn create_mode(&self) -> CreateMode {
        self.create_mode
    }

    pub fn set_create_mode(&mut self, mode: CreateMode) {
        self.create_mode = mode;
    }

    pub fn create_color(&self) -> ModelColor {
        self.create_color
    }

    pub fn set_create_color(&mut self, color: ModelColor) {
        self.create_color = color;
    }

    pub fn is_user_interaction_enabled(&self) -> bool {
        self.user_interaction_enabled
    }

    pub fn set_user_interaction_enabled(&mut self, enabled: bool) {
        self.user_interaction_enabled = enabled;
    }

    /// Index of the topmost view under `point`.
    fn item_at(&self, point: Point) -> Option<usize> {
        self.views.iter().rposition(|v| v.contains(point))
    }

    /// Make `index` the selected shape, deselecting whatever held the slot.
    fn select_view(&mut self, index: usize) {
        if let Some(previous) = self.selected.filter(|&p| p != index) {
            self.views[previous].set_selected(false, &mut self.surface);
        }
        if let Some(mut text) = self.selected_text.take() {
            text.deselect();
        }
        self.selected = Some(index);
        self.views[index].set_selected(true, &mut self.surface);
    }

    fn clear_shape_selection(&mut self) {
        if let Some(index) = self.selected.take() {
            self.views[index].set_selected(false, &mut self.surface);
        }
    }

    fn add_view(&mut self, shape: ShapeModel, model_index: usize) -> usize {
        let mut view = make_view(shape, model_index, &self.config, &mut self.surface);
        view.add_to(&mut self.surface);
        self.views.push(view);
        self.views.len() - 1
    }

    /// Store a view's update in the document. Returns whether the document changed.
    fn commit(&mut self, update: Option<ShapeUpdate>) -> bool {
        let Some(update) = update else {
            return false;
        };
        match self.model.apply(update) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Dropping view update: {}", err);
                false
            }
        }
    }

    fn notify(&mut self) {
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.on_model_updated(&self.model);
        }
    }

    /// Handle a press. Returns whether the canvas consumed it.
    pub fn pointer_down(&mut self, location: Point) -> bool {
        if !self.user_interaction_enabled {
            return false;
        }
        self.last_dragged_point = Some(location);

        if let Some(index) = self.selected {
            if let Some(knob) = self.views[index].knob_at(location) {
                log::debug!("Grabbed knob {:?}", knob);
                self.drag = DragState::DraggingKnob(knob);
                return true;
            }
        }

        if let Some(index) = self.item_at(location) {
            log::debug!("Selected {} #{}", self.views[index].kind().name(), self.views[index].model_index());
            self.select_view(index);
            self.drag = DragState::DraggingShape;
            return true;
        }

        self.drag = DragState::Idle;
        if self.selected.is_none() && self.selected_text.is_none() {
            if let Some(shape) = self.create_mode.create_on_click(location, self.create_color) {
                let model_index = self.model.append(shape.clone());
                let index = self.add_view(shape, model_index);
                self.views[index].initial_setup(&mut self.surface);
                self.notify();
                return true;
            }
        }

        self.clear_shape_selection();
        false
    }

    /// Handle pointer movement while pressed.
    pub fn pointer_dragged(&mut self, location: Point) {
        if !self.user_interaction_enabled {
            return;
        }
        let Some(from) = self.last_dragged_point else {
            return;
        };

        let Some(index) = self.selected else {
            let created = self.create_mode.create_on_drag(
                from,
                location,
                self.create_color,
                &self.config.min_drag_distance,
            );
            if let Some(creation) = created {
                let model_index = self.model.append(creation.shape.clone());
                let index = self.add_view(creation.shape, model_index);
                if let Some(mut text) = self.selected_text.take() {
                    text.deselect();
                }
                // Selected visuals appear on release
                self.selected = Some(index);
                self.drag = DragState::DraggingNewShape(creation.knob);
                self.is_changed = true;
                self.last_dragged_point = Some(location);
                log::debug!("Created {} #{}", self.create_mode.kind().name(), model_index);
            }
            return;
        };

        let view = &mut self.views[index];
        let update = match self.drag {
            DragState::DraggingKnob(knob) | DragState::DraggingNewShape(Some(knob)) => {
                view.dragged_knob(knob, from, location, &mut self.surface)
            }
            DragState::DraggingNewShape(None) => view.extend_stroke(location, &mut self.surface),
            DragState::DraggingShape | DragState::Idle => view.dragged(from, location, &mut self.surface),
        };
        log::trace!("Drag {:?} {:?} -> {:?}", self.drag, from, location);
        if self.commit(update) {
            self.is_changed = true;
        }
        self.last_dragged_point = Some(location);
    }

    /// Handle release: end the gesture and report a changed document.
    pub fn pointer_up(&mut self, _location: Point) {
        if !self.user_interaction_enabled {
            return;
        }
        self.drag = DragState::Idle;
        if let Some(index) = self.selected {
            self.views[index].set_selected(true, &mut self.surface);
        }
        if self.is_changed {
            self.notify();
            self.is_changed = false;
        }
        self.last_dragged_point = None;
    }

    /// Dispatch a recorded pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position),
            PointerEvent::Dragged { position } => {
                self.pointer_dragged(position);
                true
            }
            PointerEvent::Up { position } => {
                self.pointer_up(position);
                true
            }
        }
    }

    /// Delete the selected shape, or else the selected text annotation.
    pub fn delete_selected(&mut self) -> Result<(), ModelError> {
        if let Some(index) = self.selected {
            let view = &self.views[index];
            let model = self.model.copy_without(view.kind(), view.model_index())?;
            log::debug!("Deleting {} #{}", view.kind().name(), view.model_index());
            self.update(model);
            self.notify();
            return Ok(());
        }
        if let Some(mut text) = self.selected_text.take() {
            text.delete();
        }
        Ok(())
    }

    /// Clear the selection slot.
    pub fn deselect_all(&mut self) {
        self.clear_shape_selection();
        if let Some(mut text) = self.selected_text.take() {
            text.deselect();
        }
    }

    /// Make a text annotation the selection.
    pub fn select_text_annotation(&mut self, annotation: Box<dyn TextAnnotation>) {
        self.clear_shape_selection();
        if let Some(mut previous) = self.selected_text.replace(annotation) {
            previous.deselect();
        }
    }

    /// Recolor the selected shape.
    pub fn update_selected_color(&mut self, color: ModelColor) {
        let Some(index) = self.selected else {
            return;
        };
        let update = self.views[index].update_color(color, &mut self.surface);
        if self.commit(update) {
            self.notify();
        }
    }

    /// Replace the whole document and rebuild every view.
    pub fn update(&mut self, model: CanvasModel) {
        log::debug!("Replacing document ({} shapes)", model.len());
        for mut view in self.views.drain(..) {
            view.remove_from(&mut self.surface);
        }
        self.selected = None;
        self.drag = DragState::Idle;
        // A gesture in flight does not survive a document swap
        self.last_dragged_point = None;
        self.is_changed = false;
        self.model = model;
        let shapes: Vec<_> = self.model.shapes().collect();
        for (model_index, shape) in shapes {
            self.add_view(shape, model_index);
        }
    }
}
