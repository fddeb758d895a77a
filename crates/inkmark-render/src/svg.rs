//! SVG output.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use inkmark_core::surface::LayerStyle;
use peniko::Color;
use std::fmt::Write;
use std::path::Path;

/// Renders a layer tree into a standalone SVG document.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    output: String,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The document produced by the last [`Renderer::build_scene`].
    pub fn svg(&self) -> &str {
        &self.output
    }

    pub fn into_svg(self) -> String {
        self.output
    }

    /// Write the last document to a file.
    pub fn write_to(&self, path: &Path) -> RenderResult<()> {
        std::fs::write(path, &self.output).map_err(|source| RendererError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Wrote SVG to {}", path.display());
        Ok(())
    }
}

/// `rgb(..)` plus opacity for a color.
fn paint(color: Color) -> (String, f32) {
    let rgba = color.to_rgba8();
    (
        format!("rgb({},{},{})", rgba.r, rgba.g, rgba.b),
        f32::from(rgba.a) / 255.0,
    )
}

fn write_style(out: &mut String, style: &LayerStyle) -> std::fmt::Result {
    match style.fill {
        Some(fill) => {
            let (rgb, opacity) = paint(fill.into());
            write!(out, r#" fill="{}" fill-opacity="{}""#, rgb, opacity)?;
        }
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = style.stroke.filter(|_| style.line_width > 0.0) {
        let (rgb, opacity) = paint(stroke.into());
        write!(
            out,
            r#" stroke="{}" stroke-opacity="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round""#,
            rgb, opacity, style.line_width
        )?;
    }
    Ok(())
}

impl Renderer for SvgRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let mut out = String::new();
        let view = ctx.view_box;
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            view.width(),
            view.height(),
            view.x0,
            view.y0,
            view.width(),
            view.height()
        )?;

        let (rgb, opacity) = paint(self.background_color(ctx));
        writeln!(
            out,
            r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="{}"/>"#,
            view.x0,
            view.y0,
            view.width(),
            view.height(),
            rgb,
            opacity
        )?;

        let mut drawn = 0;
        for id in ctx.paint_order() {
            let Some(node) = ctx.surface.layer(id) else {
                continue;
            };
            if node.path.is_empty() {
                continue;
            }
            write!(out, r#"  <path d="{}""#, node.path.to_svg())?;
            write_style(&mut out, &node.style)?;
            out.push_str("/>\n");
            drawn += 1;
        }
        out.push_str("</svg>\n");

        log::debug!("Built SVG scene with {} paths", drawn);
        self.output = out;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkmark_core::{CanvasModel, EditableCanvas, EditorConfig, MemorySurface, ModelColor, RectModel};
    use kurbo::{Point, Size};

    fn render(canvas: &EditableCanvas<MemorySurface>) -> String {
        let mut renderer = SvgRenderer::new();
        let ctx = RenderContext::new(canvas.surface(), Size::new(200.0, 100.0));
        renderer.build_scene(&ctx).unwrap();
        renderer.into_svg()
    }

    #[test]
    fn test_rect_outline() {
        let mut model = CanvasModel::new();
        model.append(RectModel::new(Point::new(10.0, 10.0), Point::new(60.0, 40.0), ModelColor::VIOLET).into());
        let canvas = EditableCanvas::with_model(MemorySurface::new(), EditorConfig::default(), model);

        let svg = render(&canvas);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(svg.contains(r#"stroke="rgb(96,97,237)""#));
        assert!(svg.contains(r#"stroke-width="5""#));
        assert!(svg.contains(r#"fill="none""#));
    }

    #[test]
    fn test_selected_shape_draws_knobs() {
        let mut model = CanvasModel::new();
        model.append(RectModel::new(Point::new(10.0, 10.0), Point::new(60.0, 40.0), ModelColor::GREEN).into());
        let mut canvas = EditableCanvas::with_model(MemorySurface::new(), EditorConfig::default(), model);
        canvas.pointer_down(Point::new(30.0, 30.0));
        canvas.pointer_up(Point::new(30.0, 30.0));

        let svg = render(&canvas);
        // Outline plus four corner knobs
        assert_eq!(svg.matches("<path").count(), 5);
        assert!(svg.contains(r#"fill="rgb(255,255,255)""#));
    }
}
