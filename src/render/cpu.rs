use std::borrow::Cow;

use crate::{
    assets::decode::{PreparedImage, unpremultiply_rgba8_in_place},
    assets::template::OverlayTemplate,
    foundation::core::{Affine, Canvas, DrawRect, cover_fit},
    foundation::error::{LayoutError, LayoutResult},
};

/// Largest side a `vello_cpu` pixmap can hold.
const MAX_PAINT_SIDE: u32 = u16::MAX as u32;

/// One composited canvas readback.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8 pixels.
    pub data: Vec<u8>,
}

impl Frame {
    /// Straight (non-premultiplied) RGBA8 copy of the pixels.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }
}

/// Image paint plus the size of the rectangle it fills in its own space.
struct Paint {
    image: vello_cpu::Image,
    width: f64,
    height: f64,
}

impl Paint {
    fn from_prepared(img: &PreparedImage) -> LayoutResult<Self> {
        let w: u16 = img
            .width
            .try_into()
            .map_err(|_| LayoutError::render("paint width exceeds u16"))?;
        let h: u16 = img
            .height
            .try_into()
            .map_err(|_| LayoutError::render("paint height exceeds u16"))?;
        if img.rgba8_premul.len() != usize::from(w) * usize::from(h) * 4 {
            return Err(LayoutError::render("prepared image byte length mismatch"));
        }

        let pixels: Vec<_> = img
            .rgba8_premul
            .chunks_exact(4)
            .map(|px| vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            })
            .collect();
        let translucent = pixels.iter().any(|px| px.a != 255);
        let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, translucent);

        Ok(Self {
            image: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
            width: f64::from(w),
            height: f64::from(h),
        })
    }

    fn draw(&self, ctx: &mut vello_cpu::RenderContext, transform: Affine) {
        ctx.set_transform(vello_cpu::kurbo::Affine::new(transform.as_coeffs()));
        ctx.set_paint(self.image.clone());
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, self.width, self.height));
    }
}

/// Fixed-size CPU canvas that draws a cover-fit photo with the overlay on top.
pub struct CpuCompositor {
    canvas: Canvas,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    overlay: Paint,
    overlay_transform: Affine,
}

impl CpuCompositor {
    /// Prepare a canvas sized for `template`.
    pub fn new(template: &OverlayTemplate) -> LayoutResult<Self> {
        let canvas = template.canvas();
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| LayoutError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| LayoutError::render("canvas height exceeds u16"))?;

        let overlay_img = fit_paint_bounds(template.image())?;
        let overlay = Paint::from_prepared(&overlay_img)?;
        let overlay_transform =
            DrawRect::full(canvas).to_affine(overlay_img.width, overlay_img.height)?;

        Ok(Self {
            canvas,
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
            overlay,
            overlay_transform,
        })
    }

    /// Draw `photo` cover-fit, then the overlay across the whole canvas.
    ///
    /// Photos with a side beyond 65535 px are downscaled first; cover fit shrinks
    /// them onto the canvas regardless.
    pub fn compose(&mut self, photo: &PreparedImage) -> LayoutResult<Frame> {
        let photo = fit_paint_bounds(photo)?;
        let rect = cover_fit(self.canvas, photo.width, photo.height)?;
        tracing::debug!(
            src_w = photo.width,
            src_h = photo.height,
            x = rect.x,
            y = rect.y,
            w = rect.width,
            h = rect.height,
            "cover fit"
        );
        let photo_transform = rect.to_affine(photo.width, photo.height)?;
        let photo_paint = Paint::from_prepared(&photo)?;

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        photo_paint.draw(&mut ctx, photo_transform);
        self.overlay.draw(&mut ctx, self.overlay_transform);
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);

        Ok(Frame {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
        })
    }
}

/// Shrink `img` (aspect kept) until both sides fit in a pixmap.
fn fit_paint_bounds(img: &PreparedImage) -> LayoutResult<Cow<'_, PreparedImage>> {
    if img.width <= MAX_PAINT_SIDE && img.height <= MAX_PAINT_SIDE {
        return Ok(Cow::Borrowed(img));
    }

    let max = f64::from(MAX_PAINT_SIDE);
    let scale = (max / f64::from(img.width)).min(max / f64::from(img.height));
    let fit = |side: u32| ((f64::from(side) * scale).round() as u32).clamp(1, MAX_PAINT_SIDE);
    let (w, h) = (fit(img.width), fit(img.height));

    let src = image::RgbaImage::from_raw(img.width, img.height, img.rgba8_premul.to_vec())
        .ok_or_else(|| LayoutError::render("prepared image byte length mismatch"))?;
    let resized = image::imageops::resize(&src, w, h, image::imageops::FilterType::Triangle);
    tracing::debug!(
        from_w = img.width,
        from_h = img.height,
        to_w = w,
        to_h = h,
        "downscaled oversized photo"
    );
    Ok(Cow::Owned(PreparedImage::from_premul(w, h, resized.into_raw())?))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
