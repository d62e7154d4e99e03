use std::io::Cursor;

use anyhow::Context;
use resvg::tiny_skia;

use crate::foundation::color::Rgba8;
use crate::foundation::core::{Rect, Size};
use crate::foundation::error::{RevealError, RevealResult};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Canvas-style global composite operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompositeOp {
    /// Normal painting (`source-over`).
    #[default]
    SourceOver,
    /// Erase destination alpha where the source is opaque (`destination-out`).
    DestinationOut,
}

impl CompositeOp {
    /// Canvas 2D name of the operation.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::SourceOver => "source-over",
            Self::DestinationOut => "destination-out",
        }
    }

    fn blend_mode(self) -> tiny_skia::BlendMode {
        match self {
            Self::SourceOver => tiny_skia::BlendMode::SourceOver,
            Self::DestinationOut => tiny_skia::BlendMode::DestinationOut,
        }
    }
}

/// Pixel drawing target whose size tracks a container box.
pub struct Surface {
    pixmap: tiny_skia::Pixmap,
    op: CompositeOp,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("op", &self.op)
            .finish()
    }
}

impl Surface {
    /// Transparent surface of the given size (each side at least 1).
    pub fn new(width: u32, height: u32) -> RevealResult<Self> {
        let (width, height) = (width.max(1), height.max(1));
        let pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            RevealError::validation(format!("cannot allocate {width}x{height} surface"))
        })?;
        Ok(Self {
            pixmap,
            op: CompositeOp::SourceOver,
        })
    }

    /// Pixel dimensions used for a container box: one pixel larger than the box on each
    /// axis, truncated like a canvas width assignment.
    pub fn pixels_for_container(container: Size) -> (u32, u32) {
        fn axis(v: f64) -> u32 {
            if !v.is_finite() {
                return 1;
            }
            (v + 1.0).floor().clamp(1.0, f64::from(u32::MAX)) as u32
        }
        (axis(container.width), axis(container.height))
    }

    /// Reallocate to match `container`. Contents are cleared to transparent.
    pub fn resize_to_container(&mut self, container: Size) -> RevealResult<()> {
        let (width, height) = Self::pixels_for_container(container);
        *self = Self::new(width, height)?;
        tracing::debug!(width, height, "surface resized");
        Ok(())
    }

    /// Replace every pixel with `color`.
    pub fn fill(&mut self, color: Rgba8) {
        self.pixmap.fill(color.to_skia());
    }

    /// Switch the composite operation for the lifetime of the returned scope.
    ///
    /// The operation goes back to [`CompositeOp::SourceOver`] when the scope drops.
    pub fn composite(&mut self, op: CompositeOp) -> CompositeScope<'_> {
        self.op = op;
        CompositeScope { surface: self }
    }

    /// Active composite operation.
    pub fn composite_op(&self) -> CompositeOp {
        self.op
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Geometric center in surface coordinates.
    pub fn center(&self) -> crate::foundation::core::Point {
        crate::foundation::core::Point::new(
            f64::from(self.width()) / 2.0,
            f64::from(self.height()) / 2.0,
        )
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        let p = self.pixmap.pixel(x, y)?;
        Some([p.red(), p.green(), p.blue(), p.alpha()])
    }

    /// Premultiplied RGBA8 bytes, row-major, tightly packed.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Encode the surface as PNG (straight alpha).
    pub fn encode_png(&self) -> RevealResult<Vec<u8>> {
        let mut rgba = self.pixmap.data().to_vec();
        demultiply_rgba8_in_place(&mut rgba);
        let img = image::RgbaImage::from_raw(self.width(), self.height(), rgba)
            .ok_or_else(|| RevealError::raster("surface buffer size mismatch"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode surface png")?;
        Ok(buf)
    }
}

/// Scoped composite operation on a [`Surface`].
pub struct CompositeScope<'a> {
    surface: &'a mut Surface,
}

impl CompositeScope<'_> {
    /// Draw `image` stretched into `dest` with bilinear sampling.
    ///
    /// Returns `false` when `dest` is empty or not finite and nothing was drawn.
    pub fn draw_image(&mut self, image: &tiny_skia::Pixmap, dest: Rect) -> bool {
        let (w, h) = (dest.width(), dest.height());
        if !(w.is_finite() && h.is_finite() && dest.x0.is_finite() && dest.y0.is_finite())
            || w <= 0.0
            || h <= 0.0
        {
            return false;
        }
        let sx = (w / f64::from(image.width())) as f32;
        let sy = (h / f64::from(image.height())) as f32;
        let transform =
            tiny_skia::Transform::from_row(sx, 0.0, 0.0, sy, dest.x0 as f32, dest.y0 as f32);

        let mut paint = tiny_skia::PixmapPaint::default();
        paint.quality = tiny_skia::FilterQuality::Bilinear;
        paint.blend_mode = self.surface.op.blend_mode();
        self.surface
            .pixmap
            .draw_pixmap(0, 0, image.as_ref(), &paint, transform, None);
        true
    }
}

impl Drop for CompositeScope<'_> {
    fn drop(&mut self) {
        self.surface.op = CompositeOp::SourceOver;
    }
}

fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
