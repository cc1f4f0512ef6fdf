use std::io::Cursor;

use anyhow::Context;

use crate::{
    foundation::error::{LayoutError, LayoutResult},
    render::cpu::Frame,
};

/// Default JPEG quality for previews, on a 1..=100 scale.
pub const DEFAULT_PREVIEW_QUALITY: u8 = 80;

/// Encode a composited frame as PNG (alpha preserved).
pub fn encode_png(frame: &Frame) -> LayoutResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.to_straight_rgba8())
        .ok_or_else(|| LayoutError::encode("frame buffer does not match its dimensions"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Encode a small-footprint JPEG preview. Transparent areas come out black.
pub fn encode_jpeg_preview(frame: &Frame, quality: u8) -> LayoutResult<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(LayoutError::validation(format!(
            "jpeg quality must be in 1..=100, got {quality}"
        )));
    }

    // Premultiplied colour is already the colour composited over black.
    let rgb: Vec<u8> = frame
        .data
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    let img = image::RgbImage::from_raw(frame.width, frame.height, rgb)
        .ok_or_else(|| LayoutError::encode("frame buffer does not match its dimensions"))?;

    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality)
        .encode_image(&img)
        .context("encode jpeg preview")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/image_out.rs"]
mod tests;
