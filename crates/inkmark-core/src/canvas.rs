//! Canvas model: the document, one ordered sequence per shape kind.

use crate::shapes::{ArrowModel, PenModel, RectModel, ShapeKind, ShapeModel};
use crate::view::ShapeUpdate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Document errors.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("No {} at index {index} (have {len})", .kind.name())]
    IndexOutOfRange {
        kind: ShapeKind,
        index: usize,
        len: usize,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// All shapes of a document.
///
/// Insertion order is drawing order within a kind. Indices are per kind and
/// shift down when an earlier element of the same kind is removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasModel {
    pub arrows: Vec<ArrowModel>,
    pub rects: Vec<RectModel>,
    pub pens: Vec<PenModel>,
}

impl CanvasModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shapes of one kind.
    pub fn count(&self, kind: ShapeKind) -> usize {
        match kind {
            ShapeKind::Arrow => self.arrows.len(),
            ShapeKind::Rect => self.rects.len(),
            ShapeKind::Pen => self.pens.len(),
        }
    }

    /// Total number of shapes.
    pub fn len(&self) -> usize {
        self.arrows.len() + self.rects.len() + self.pens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a shape to its kind's sequence and return its index there.
    pub fn append(&mut self, shape: ShapeModel) -> usize {
        match shape {
            ShapeModel::Arrow(m) => {
                self.arrows.push(m);
                self.arrows.len() - 1
            }
            ShapeModel::Rect(m) => {
                self.rects.push(m);
                self.rects.len() - 1
            }
            ShapeModel::Pen(m) => {
                self.pens.push(m);
                self.pens.len() - 1
            }
        }
    }

    /// Get a shape by kind and index.
    pub fn get(&self, kind: ShapeKind, index: usize) -> Option<ShapeModel> {
        match kind {
            ShapeKind::Arrow => self.arrows.get(index).cloned().map(ShapeModel::Arrow),
            ShapeKind::Rect => self.rects.get(index).cloned().map(ShapeModel::Rect),
            ShapeKind::Pen => self.pens.get(index).cloned().map(ShapeModel::Pen),
        }
    }

    /// Store an index-tagged update coming from a view.
    pub fn apply(&mut self, update: ShapeUpdate) -> Result<(), ModelError> {
        let kind = update.shape.kind();
        let len = self.count(kind);
        let out_of_range = ModelError::IndexOutOfRange {
            kind,
            index: update.index,
            len,
        };
        match update.shape {
            ShapeModel::Arrow(m) => *self.arrows.get_mut(update.index).ok_or(out_of_range)? = m,
            ShapeModel::Rect(m) => *self.rects.get_mut(update.index).ok_or(out_of_range)? = m,
            ShapeModel::Pen(m) => *self.pens.get_mut(update.index).ok_or(out_of_range)? = m,
        }
        Ok(())
    }

    /// A copy of this document without one shape. Later shapes of the same
    /// kind move down one index.
    pub fn copy_without(&self, kind: ShapeKind, index: usize) -> Result<Self, ModelError> {
        let len = self.count(kind);
        if index >= len {
            return Err(ModelError::IndexOutOfRange { kind, index, len });
        }
        let mut copy = self.clone();
        match kind {
            ShapeKind::Arrow => {
                copy.arrows.remove(index);
            }
            ShapeKind::Rect => {
                copy.rects.remove(index);
            }
            ShapeKind::Pen => {
                copy.pens.remove(index);
            }
        }
        Ok(copy)
    }

    /// Every shape with its per-kind index, in drawing order: arrows, then
    /// rectangles, then pen strokes.
    pub fn shapes(&self) -> impl Iterator<Item = (usize, ShapeModel)> + '_ {
        let arrows = self.arrows.iter().cloned().map(ShapeModel::Arrow).enumerate();
        let rects = self.rects.iter().cloned().map(ShapeModel::Rect).enumerate();
        let pens = self.pens.iter().cloned().map(ShapeModel::Pen).enumerate();
        arrows.chain(rects).chain(pens)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON. Missing sequences are empty.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }
}
