use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use resvg::tiny_skia;

use crate::assets::logo::{LogoElement, derive_aspect_ratio};
use crate::assets::object_url::{ObjectUrl, ObjectUrls, SVG_MIME};
use crate::foundation::error::{RevealError, RevealResult};

const MAX_DIM: u32 = 16_384;

/// Decoded logo bitmap plus its aspect ratio. Immutable once built.
#[derive(Clone)]
pub struct RasterizedLogo {
    pixmap: Arc<tiny_skia::Pixmap>,
    aspect_ratio: f64,
}

impl RasterizedLogo {
    /// Wrap an already decoded bitmap. A non-positive or non-finite ratio becomes 1.
    pub fn new(pixmap: tiny_skia::Pixmap, aspect_ratio: f64) -> Self {
        let aspect_ratio = if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            aspect_ratio
        } else {
            1.0
        };
        Self {
            pixmap: Arc::new(pixmap),
            aspect_ratio,
        }
    }

    /// Premultiplied RGBA bitmap.
    pub fn pixmap(&self) -> &tiny_skia::Pixmap {
        &self.pixmap
    }

    /// Width divided by height, always positive.
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Bitmap width in pixels.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Bitmap height in pixels.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }
}

impl fmt::Debug for RasterizedLogo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterizedLogo")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("aspect_ratio", &self.aspect_ratio)
            .finish()
    }
}

/// Pixel size an SVG of logical `size` is rasterized at for a given scale.
pub fn raster_size(width: f32, height: f32, scale: f32) -> RevealResult<(u32, u32)> {
    fn to_px(v: f32, scale: f32) -> RevealResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(RevealError::raster("svg has invalid width/height"));
        }
        Ok(((v * scale).ceil() as u32).max(1))
    }

    if !scale.is_finite() || scale <= 0.0 {
        return Err(RevealError::raster(format!("invalid raster scale {scale}")));
    }
    let w = to_px(width, scale)?;
    let h = to_px(height, scale)?;
    if w > MAX_DIM || h > MAX_DIM {
        return Err(RevealError::raster(format!(
            "svg raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok((w, h))
}

/// Parse SVG bytes and render them into a premultiplied bitmap.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_logo(bytes: &[u8], aspect_ratio: f64, scale: f32) -> RevealResult<RasterizedLogo> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| RevealError::svg(format!("parse svg tree: {e}")))?;

    let size = tree.size();
    let (width, height) = raster_size(size.width(), size.height(), scale)?;
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| RevealError::raster("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );
    tracing::debug!(width, height, aspect_ratio, "logo rasterized");
    Ok(RasterizedLogo::new(pixmap, aspect_ratio))
}

/// A decode waiting for its turn on the event loop.
#[derive(Debug)]
struct PendingDecode {
    generation: u64,
    url: ObjectUrl,
    aspect_ratio: f64,
}

/// Outcome of one queued decode.
#[derive(Debug)]
pub struct DecodeCompletion {
    /// Generation the decode was started with.
    pub generation: u64,
    /// Decoded logo, or why decoding failed.
    pub result: RevealResult<RasterizedLogo>,
}

/// Converts the inline logo element into a bitmap, one queued decode at a time.
///
/// [`LogoRasterizer::begin`] does the synchronous part (serialize, wrap in a blob, derive the
/// aspect ratio). [`LogoRasterizer::next_completion`] runs one decode, releases its object URL
/// and reports the result.
#[derive(Debug)]
pub struct LogoRasterizer {
    urls: ObjectUrls,
    queue: VecDeque<PendingDecode>,
    aspect_ratio: f64,
    scale: f32,
}

impl LogoRasterizer {
    /// Rasterizer that renders at `scale` times the SVG's logical size.
    pub fn new(scale: f32) -> Self {
        Self {
            urls: ObjectUrls::new(),
            queue: VecDeque::new(),
            aspect_ratio: 1.0,
            scale,
        }
    }

    /// Queue a decode of `element`, tagged with `generation`.
    pub fn begin(&mut self, element: &LogoElement, generation: u64) -> ObjectUrl {
        self.aspect_ratio = derive_aspect_ratio(element, self.aspect_ratio);
        let url = self
            .urls
            .create(element.markup.as_bytes().to_vec(), SVG_MIME);
        tracing::debug!(%url, generation, aspect_ratio = self.aspect_ratio, "logo decode queued");
        self.queue.push_back(PendingDecode {
            generation,
            url: url.clone(),
            aspect_ratio: self.aspect_ratio,
        });
        url
    }

    /// Run the oldest queued decode, if any.
    pub fn next_completion(&mut self) -> Option<DecodeCompletion> {
        let pending = self.queue.pop_front()?;
        let result = match self.urls.resolve(&pending.url) {
            Some(blob) => decode_logo(&blob.bytes, pending.aspect_ratio, self.scale),
            None => Err(RevealError::raster(format!(
                "object url {} was released before decode",
                pending.url
            ))),
        };
        self.urls.revoke(&pending.url);
        Some(DecodeCompletion {
            generation: pending.generation,
            result,
        })
    }

    /// Number of decodes still queued.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Most recently derived aspect ratio (1 before any decode).
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Object URL bookkeeping.
    pub fn urls(&self) -> &ObjectUrls {
        &self.urls
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/raster.rs"]
mod tests;
