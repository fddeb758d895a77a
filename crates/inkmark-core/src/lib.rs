//! Inkmark Core Library
//!
//! Editable annotation shapes (arrows, rectangles, pen strokes) over a host
//! drawing surface: immutable shape models, knob handles, diff-rendered shape
//! views and the pointer state machine that edits a canvas document.

pub mod canvas;
pub mod color;
pub mod config;
pub mod editable;
pub mod geometry;
pub mod input;
pub mod knob;
pub mod shapes;
pub mod storage;
pub mod surface;
pub mod tools;
pub mod view;

pub use canvas::{CanvasModel, ModelError};
pub use color::{DEFAULT_COLORS, ModelColor};
pub use config::{ConfigError, CreationThresholds, EditorConfig};
pub use editable::{CanvasDelegate, DragState, EditableCanvas, TextAnnotation};
pub use geometry::PointExt;
pub use input::PointerEvent;
pub use knob::{Knob, KnobState};
pub use shapes::{ArrowModel, ArrowPoint, ControlPoint, PenModel, RectModel, RectPoint, ShapeKind, ShapeModel};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use surface::{LayerId, LayerNode, LayerStyle, MemorySurface, Surface};
pub use tools::{CreateMode, Creation};
pub use view::{ShapeUpdate, ShapeView, ViewState};
