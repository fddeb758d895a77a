//! Inkmark Render Library
//!
//! Renderer abstraction over the retained layers of a
//! [`MemorySurface`](inkmark_core::MemorySurface), with an SVG implementation.

mod renderer;
mod svg;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use svg::SvgRenderer;
