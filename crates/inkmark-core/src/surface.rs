//! Host drawing surface abstraction.
//!
//! The editor never rasterizes anything itself. Shape views and knobs own
//! layers on a [`Surface`] and push paths and styles into them; the host
//! decides how layers become pixels.

use crate::color::ModelColor;
use kurbo::BezPath;
use std::collections::HashMap;

/// Handle to a layer created on a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

/// Fill and stroke settings of a layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerStyle {
    /// Fill color (None = no fill).
    pub fill: Option<ModelColor>,
    /// Stroke color (None = no stroke).
    pub stroke: Option<ModelColor>,
    /// Stroke width.
    pub line_width: f64,
}

impl LayerStyle {
    /// Filled, unstroked layer.
    pub fn filled(color: ModelColor) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            line_width: 0.0,
        }
    }

    /// Stroked outline without fill.
    pub fn stroked(color: ModelColor, line_width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(color),
            line_width,
        }
    }
}

/// The drawable layer system the editor renders into.
pub trait Surface {
    /// Create a detached layer with an empty path.
    fn create_layer(&mut self, style: LayerStyle) -> LayerId;

    /// Replace the layer's geometry.
    fn set_path(&mut self, layer: LayerId, path: BezPath);

    /// Replace the layer's fill/stroke settings.
    fn set_style(&mut self, layer: LayerId, style: LayerStyle);

    /// Attach a layer on top of `parent`'s children, or of the canvas root when
    /// `parent` is `None`. Re-adding an attached layer moves it to the top.
    fn add_layer(&mut self, layer: LayerId, parent: Option<LayerId>);

    /// Detach a layer immediately, with no transition.
    fn remove_layer(&mut self, layer: LayerId);

    /// Detach a layer and drop it for good. The id must not be used again.
    fn release_layer(&mut self, layer: LayerId) {
        self.remove_layer(layer);
    }
}

/// State of one layer in a [`MemorySurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayerNode {
    pub path: BezPath,
    pub style: LayerStyle,
    /// `None` when detached, `Some(None)` when attached to the root.
    pub attachment: Option<Option<LayerId>>,
}

/// Retained, in-memory surface.
///
/// Used by the renderer and the command line shell, and by tests to observe
/// exactly which operations the editor performs.
#[derive(Debug, Default)]
pub struct MemorySurface {
    next_id: u64,
    layers: HashMap<LayerId, LayerNode>,
    /// Attached layers in attach order (back to front).
    order: Vec<LayerId>,
    operations: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of mutating calls received so far.
    pub fn operations(&self) -> usize {
        self.operations
    }

    pub fn layer(&self, id: LayerId) -> Option<&LayerNode> {
        self.layers.get(&id)
    }

    /// Number of layers that have not been released.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn is_attached(&self, id: LayerId) -> bool {
        self.layers
            .get(&id)
            .is_some_and(|node| node.attachment.is_some())
    }

    /// Root layers, back to front.
    pub fn roots(&self) -> Vec<LayerId> {
        self.attached_under(None)
    }

    /// Children of `parent`, back to front.
    pub fn children(&self, parent: LayerId) -> Vec<LayerId> {
        self.attached_under(Some(parent))
    }

    fn attached_under(&self, parent: Option<LayerId>) -> Vec<LayerId> {
        self.order
            .iter()
            .copied()
            .filter(|id| {
                self.layers
                    .get(id)
                    .is_some_and(|node| node.attachment == Some(parent))
            })
            .collect()
    }

    fn detach(&mut self, layer: LayerId) {
        self.order.retain(|&id| id != layer);
        if let Some(node) = self.layers.get_mut(&layer) {
            node.attachment = None;
        }
    }
}

impl Surface for MemorySurface {
    fn create_layer(&mut self, style: LayerStyle) -> LayerId {
        self.operations += 1;
        self.next_id += 1;
        let id = LayerId(self.next_id);
        self.layers.insert(
            id,
            LayerNode {
                path: BezPath::new(),
                style,
                attachment: None,
            },
        );
        id
    }

    fn set_path(&mut self, layer: LayerId, path: BezPath) {
        self.operations += 1;
        match self.layers.get_mut(&layer) {
            Some(node) => node.path = path,
            None => log::warn!("set_path on unknown layer {:?}", layer),
        }
    }

    fn set_style(&mut self, layer: LayerId, style: LayerStyle) {
        self.operations += 1;
        match self.layers.get_mut(&layer) {
            Some(node) => node.style = style,
            None => log::warn!("set_style on unknown layer {:?}", layer),
        }
    }

    fn add_layer(&mut self, layer: LayerId, parent: Option<LayerId>) {
        self.operations += 1;
        if !self.layers.contains_key(&layer) {
            log::warn!("add_layer on unknown layer {:?}", layer);
            return;
        }
        self.detach(layer);
        if let Some(node) = self.layers.get_mut(&layer) {
            node.attachment = Some(parent);
        }
        self.order.push(layer);
    }

    fn remove_layer(&mut self, layer: LayerId) {
        self.operations += 1;
        self.detach(layer);
    }

    fn release_layer(&mut self, layer: LayerId) {
        self.operations += 1;
        self.detach(layer);
        self.layers.remove(&layer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, Shape};

    #[test]
    fn test_attach_order() {
        let mut surface = MemorySurface::new();
        let a = surface.create_layer(LayerStyle::filled(ModelColor::ORANGE));
        let b = surface.create_layer(LayerStyle::filled(ModelColor::GREEN));
        let knob = surface.create_layer(LayerStyle::filled(ModelColor::CLEAR));

        surface.add_layer(a, None);
        surface.add_layer(b, None);
        surface.add_layer(knob, Some(a));
        assert_eq!(surface.roots(), vec![a, b]);
        assert_eq!(surface.children(a), vec![knob]);

        // Re-adding moves to the top
        surface.add_layer(a, None);
        assert_eq!(surface.roots(), vec![b, a]);
    }

    #[test]
    fn test_remove_and_release() {
        let mut surface = MemorySurface::new();
        let a = surface.create_layer(LayerStyle::stroked(ModelColor::ORANGE, 5.0));
        surface.add_layer(a, None);
        surface.set_path(a, Rect::new(0.0, 0.0, 10.0, 10.0).to_path(0.1));

        surface.remove_layer(a);
        assert!(!surface.is_attached(a));
        assert_eq!(surface.layer_count(), 1);

        surface.release_layer(a);
        assert!(surface.layer(a).is_none());
        assert_eq!(surface.layer_count(), 0);
    }

    #[test]
    fn test_operations_are_counted() {
        let mut surface = MemorySurface::new();
        let a = surface.create_layer(LayerStyle::filled(ModelColor::ORANGE));
        surface.set_style(a, LayerStyle::filled(ModelColor::VIOLET));
        assert_eq!(surface.operations(), 2);
        assert_eq!(surface.layer(a).unwrap().style.fill, Some(ModelColor::VIOLET));
    }
}
