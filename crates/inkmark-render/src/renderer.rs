//! Renderer trait abstraction.

use inkmark_core::surface::{LayerId, MemorySurface};
use kurbo::{Point, Rect, Shape as KurboShape, Size};
use peniko::Color;
use std::path::PathBuf;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Formatting failed: {0}")]
    Format(#[from] std::fmt::Error),
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type RenderResult<T> = Result<T, RendererError>;

/// What to draw and where.
pub struct RenderContext<'a> {
    /// Layer tree to draw.
    pub surface: &'a MemorySurface,
    /// Visible region in canvas coordinates.
    pub view_box: Rect,
    pub background_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Show the region from the canvas origin to `viewport_size`.
    pub fn new(surface: &'a MemorySurface, viewport_size: Size) -> Self {
        Self {
            surface,
            view_box: Rect::from_origin_size(Point::ZERO, viewport_size),
            background_color: Color::from_rgba8(250, 250, 250, 255),
        }
    }

    /// Shrink or grow the visible region to the drawn content plus `padding`.
    /// An empty surface keeps the current region.
    pub fn fit_to_content(mut self, padding: f64) -> Self {
        if let Some(bounds) = content_bounds(self.surface) {
            self.view_box = bounds.inflate(padding, padding);
        }
        self
    }

    pub fn viewport_size(&self) -> Size {
        self.view_box.size()
    }

    /// Attached layers in paint order: each layer followed by its children.
    pub fn paint_order(&self) -> Vec<LayerId> {
        let mut order = Vec::new();
        for root in self.surface.roots() {
            push_subtree(self.surface, root, &mut order);
        }
        order
    }
}

fn push_subtree(surface: &MemorySurface, layer: LayerId, order: &mut Vec<LayerId>) {
    order.push(layer);
    for child in surface.children(layer) {
        push_subtree(surface, child, order);
    }
}

/// Union of the bounds of every attached, non-empty layer, stroke widths included.
fn content_bounds(surface: &MemorySurface) -> Option<Rect> {
    let mut order = Vec::new();
    for root in surface.roots() {
        push_subtree(surface, root, &mut order);
    }
    order
        .into_iter()
        .filter_map(|id| surface.layer(id))
        .filter(|node| !node.path.is_empty())
        .map(|node| {
            let half = node.style.line_width / 2.0;
            node.path.bounding_box().inflate(half, half)
        })
        .reduce(|acc, r| acc.union(r))
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Draw every visible layer of the context.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkmark_core::ModelColor;
    use inkmark_core::surface::{LayerStyle, Surface};

    #[test]
    fn test_paint_order_puts_children_after_parent() {
        let mut surface = MemorySurface::new();
        let a = surface.create_layer(LayerStyle::filled(ModelColor::ORANGE));
        let b = surface.create_layer(LayerStyle::filled(ModelColor::GREEN));
        let knob = surface.create_layer(LayerStyle::filled(ModelColor::CLEAR));
        surface.add_layer(a, None);
        surface.add_layer(knob, Some(a));
        surface.add_layer(b, None);

        let ctx = RenderContext::new(&surface, Size::new(100.0, 100.0));
        assert_eq!(ctx.paint_order(), vec![a, knob, b]);
    }

    #[test]
    fn test_fit_to_content() {
        let mut surface = MemorySurface::new();
        let empty = RenderContext::new(&surface, Size::new(64.0, 48.0)).fit_to_content(10.0);
        assert_eq!(empty.viewport_size(), Size::new(64.0, 48.0));

        let a = surface.create_layer(LayerStyle::stroked(ModelColor::ORANGE, 4.0));
        surface.set_path(a, Rect::new(10.0, 20.0, 110.0, 70.0).to_path(0.1));
        surface.add_layer(a, None);

        let ctx = RenderContext::new(&surface, Size::new(64.0, 48.0)).fit_to_content(10.0);
        assert_eq!(ctx.view_box, Rect::new(-2.0, 8.0, 122.0, 82.0));
    }
}
