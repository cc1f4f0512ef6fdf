use std::{io::Cursor, path::Path, sync::Arc};

use anyhow::Context;
use image::ImageDecoder as _;

use crate::foundation::error::{LayoutError, LayoutResult};

/// Decoded raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap an already premultiplied RGBA8 buffer, checking its length.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> LayoutResult<Self> {
        if rgba8_premul.len() != width as usize * height as usize * 4 {
            return Err(LayoutError::decode(format!(
                "rgba8 buffer length {} does not match {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }
}

/// Prepared SVG document represented as a parsed `usvg` tree.
#[derive(Clone, Debug)]
pub struct PreparedSvg {
    /// Parsed SVG tree.
    pub tree: Arc<usvg::Tree>,
}

/// Decode any raster format the `image` crate can read.
///
/// EXIF orientation is applied, so the pixels come out upright.
pub fn decode_image(bytes: &[u8]) -> LayoutResult<PreparedImage> {
    let mut decoder = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("guess image format")?
        .into_decoder()
        .context("open image decoder")?;
    let orientation = decoder.orientation().context("read image orientation")?;
    let mut dyn_img = image::DynamicImage::from_decoder(decoder).context("decode image")?;
    dyn_img.apply_orientation(orientation);
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(LayoutError::decode(format!(
            "decoded image has zero size ({width}x{height})"
        )));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

pub fn parse_svg(bytes: &[u8]) -> LayoutResult<PreparedSvg> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(PreparedSvg {
        tree: Arc::new(tree),
    })
}

/// Read a photo from disk and decode it.
#[tracing::instrument(level = "debug")]
pub fn load_image_file(path: &Path) -> LayoutResult<PreparedImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes).map_err(|e| LayoutError::decode(format!("{}: {e}", path.display())))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
