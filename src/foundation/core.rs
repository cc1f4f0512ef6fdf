use crate::foundation::error::{LayoutError, LayoutResult};

pub use kurbo::{Affine, Rect, Vec2};

/// Output canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas, rejecting zero sizes and sizes the CPU canvas cannot hold.
    pub fn new(width: u32, height: u32) -> LayoutResult<Self> {
        let c = Self { width, height };
        c.validate()?;
        Ok(c)
    }

    /// Check `width`/`height` are in `1..=u16::MAX`.
    pub fn validate(self) -> LayoutResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LayoutError::validation("canvas width/height must be > 0"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(LayoutError::validation(format!(
                "canvas {}x{} exceeds {}x{}",
                self.width,
                self.height,
                u16::MAX,
                u16::MAX
            )));
        }
        Ok(())
    }

    /// `width / height`.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Destination rectangle for a source image drawn onto a canvas.
///
/// `x`/`y` may be negative: the part of the image outside the canvas is cropped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawRect {
    /// Left edge in canvas pixels.
    pub x: f64,
    /// Top edge in canvas pixels.
    pub y: f64,
    /// Drawn width in canvas pixels.
    pub width: f64,
    /// Drawn height in canvas pixels.
    pub height: f64,
}

impl DrawRect {
    /// Rectangle covering exactly the given canvas.
    pub fn full(canvas: Canvas) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: f64::from(canvas.width),
            height: f64::from(canvas.height),
        }
    }

    /// As a `kurbo` rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Transform mapping a `src_w` x `src_h` image onto this rectangle.
    ///
    /// Canonical order: T(x, y) * S(width / src_w, height / src_h).
    pub fn to_affine(self, src_w: u32, src_h: u32) -> LayoutResult<Affine> {
        if src_w == 0 || src_h == 0 {
            return Err(LayoutError::validation("source image has zero size"));
        }
        let sx = self.width / f64::from(src_w);
        let sy = self.height / f64::from(src_h);
        Ok(Affine::translate(Vec2::new(self.x, self.y)) * Affine::scale_non_uniform(sx, sy))
    }
}

/// Cover-fit a `src_w` x `src_h` image into `canvas`.
///
/// The image is scaled to fully cover the canvas while preserving its aspect ratio,
/// then centered on the clamped axis. Images wider than the canvas (by aspect) are
/// clamped to canvas height, all others to canvas width.
pub fn cover_fit(canvas: Canvas, src_w: u32, src_h: u32) -> LayoutResult<DrawRect> {
    if src_w == 0 || src_h == 0 {
        return Err(LayoutError::validation(format!(
            "cannot cover-fit a {src_w}x{src_h} image"
        )));
    }
    canvas.validate()?;

    let cw = f64::from(canvas.width);
    let ch = f64::from(canvas.height);
    let img_aspect = f64::from(src_w) / f64::from(src_h);

    let rect = if img_aspect > canvas.aspect() {
        let height = ch;
        let width = height * img_aspect;
        DrawRect {
            x: -(width - cw) / 2.0,
            y: 0.0,
            width,
            height,
        }
    } else {
        let width = cw;
        let height = width / img_aspect;
        DrawRect {
            x: 0.0,
            y: -(height - ch) / 2.0,
            width,
            height,
        }
    };
    Ok(rect)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
