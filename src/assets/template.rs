use std::path::Path;

use anyhow::Context;

use crate::{
    assets::decode::{self, PreparedImage, PreparedSvg},
    foundation::core::Canvas,
    foundation::error::{LayoutError, LayoutResult},
};

/// Overlay drawn on top of every processed photo.
///
/// Raster templates keep their native pixels and are stretched to the canvas at draw
/// time. SVG templates are rasterized once, directly at canvas size.
#[derive(Clone, Debug)]
pub struct OverlayTemplate {
    canvas: Canvas,
    image: PreparedImage,
}

impl OverlayTemplate {
    /// Load a template from disk. `.svg` files are parsed as vector documents.
    ///
    /// When `canvas` is `None` the canvas takes the template's own size.
    #[tracing::instrument(level = "debug")]
    pub fn load(path: &Path, canvas: Option<Canvas>) -> LayoutResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read overlay template '{}'", path.display()))?;
        let is_svg = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        let template = if is_svg {
            Self::from_svg_bytes(&bytes, canvas)
        } else {
            Self::from_raster_bytes(&bytes, canvas)
        };
        let template = template.map_err(|e| {
            LayoutError::decode(format!(
                "could not load overlay template '{}': {e}",
                path.display()
            ))
        })?;
        tracing::info!(
            path = %path.display(),
            width = template.canvas.width,
            height = template.canvas.height,
            "overlay template loaded"
        );
        Ok(template)
    }

    /// Build a template from encoded raster bytes (PNG, JPEG, ...).
    pub fn from_raster_bytes(bytes: &[u8], canvas: Option<Canvas>) -> LayoutResult<Self> {
        let image = decode::decode_image(bytes)?;
        Self::from_image(image, canvas)
    }

    /// Build a template from an already decoded image.
    pub fn from_image(image: PreparedImage, canvas: Option<Canvas>) -> LayoutResult<Self> {
        let canvas = match canvas {
            Some(c) => c,
            None => Canvas::new(image.width, image.height)?,
        };
        canvas.validate()?;
        Ok(Self { canvas, image })
    }

    /// Build a template from SVG source, rasterized at canvas size.
    pub fn from_svg_bytes(bytes: &[u8], canvas: Option<Canvas>) -> LayoutResult<Self> {
        let svg = decode::parse_svg(bytes)?;
        let canvas = match canvas {
            Some(c) => c,
            None => {
                let size = svg.tree.size();
                Canvas::new(size.width().ceil() as u32, size.height().ceil() as u32)?
            }
        };
        canvas.validate()?;
        let rgba8_premul = rasterize_svg_to_premul_rgba8(&svg, canvas.width, canvas.height)?;
        let image = PreparedImage::from_premul(canvas.width, canvas.height, rgba8_premul)?;
        Ok(Self { canvas, image })
    }

    /// Output canvas every photo is composited onto.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Template pixels (premultiplied RGBA8, native size).
    pub fn image(&self) -> &PreparedImage {
        &self.image
    }
}

fn rasterize_svg_to_premul_rgba8(
    svg: &PreparedSvg,
    width: u32,
    height: u32,
) -> LayoutResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| LayoutError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / svg.tree.size().width();
    let sy = (height as f32) / svg.tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(&svg.tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/template.rs"]
mod tests;
