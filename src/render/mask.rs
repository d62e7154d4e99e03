use crate::assets::raster::RasterizedLogo;
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Anchor, Point, Rect, Size, logo_size};
use crate::foundation::error::RevealResult;
use crate::render::surface::{CompositeOp, Surface};

/// Frozen anchor placement for one animation run.
///
/// Built by [`MaskRenderer::anchored_scaler`]. Every [`AnchoredScaler::scale_to`] solves for the
/// draw origin that keeps the anchor at `anchor_position`:
///
/// `origin = anchor_position - (width, width / aspect_ratio) * (left_ratio, top_ratio)`
#[derive(Clone, Debug)]
pub struct AnchoredScaler {
    anchor_position: Point,
    aspect_ratio: f64,
    anchor: Anchor,
    logo: RasterizedLogo,
}

impl AnchoredScaler {
    /// Surface coordinates the anchor is pinned to.
    pub fn anchor_position(&self) -> Point {
        self.anchor_position
    }

    /// Logo aspect ratio captured at construction.
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Anchor ratios inside the logo box.
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Where the logo is drawn for `width`. Pure; touches no pixels.
    pub fn placement(&self, width: f64) -> Rect {
        let size = logo_size(width, self.aspect_ratio);
        let origin = self.anchor_position - self.anchor.offset_in(size);
        Rect::from_origin_size(origin, size)
    }

    /// Re-fill `surface` and cut the logo out at `width`.
    ///
    /// Non-finite or non-positive widths leave the surface filled and return `None`.
    pub fn scale_to(&self, surface: &mut Surface, fill: Rgba8, width: f64) -> Option<Rect> {
        surface.fill(fill);
        if !width.is_finite() || width <= 0.0 {
            return None;
        }
        let rect = self.placement(width);
        surface
            .composite(CompositeOp::DestinationOut)
            .draw_image(self.logo.pixmap(), rect)
            .then_some(rect)
    }
}

/// Owns the surface and paints the fill with a logo-shaped cut-out.
#[derive(Debug)]
pub struct MaskRenderer {
    surface: Surface,
    fill: Rgba8,
    logo: Option<RasterizedLogo>,
}

impl MaskRenderer {
    /// Renderer with a 1x1 surface and no logo.
    pub fn new(fill: Rgba8) -> RevealResult<Self> {
        Ok(Self {
            surface: Surface::new(1, 1)?,
            fill,
            logo: None,
        })
    }

    /// Size the surface to `container` and paint the resting full fill.
    pub fn initialize_surface(&mut self, container: Size) -> RevealResult<()> {
        self.surface.resize_to_container(container)?;
        self.fill();
        Ok(())
    }

    /// Paint the fill over the whole surface.
    pub fn fill(&mut self) {
        self.surface.fill(self.fill);
    }

    /// Install a freshly decoded logo, discarding the previous one.
    pub fn set_logo(&mut self, logo: RasterizedLogo) {
        self.logo = Some(logo);
    }

    /// Drop the current logo.
    pub fn clear_logo(&mut self) {
        self.logo = None;
    }

    /// Currently installed logo.
    pub fn logo(&self) -> Option<&RasterizedLogo> {
        self.logo.as_ref()
    }

    /// Fill color.
    pub fn fill_color(&self) -> Rgba8 {
        self.fill
    }

    /// Drawing surface.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Paint the logo centered at `initial_width` and freeze the anchor position.
    ///
    /// Returns `None` while no logo is loaded.
    pub fn anchored_scaler(&mut self, initial_width: f64, anchor: Anchor) -> Option<AnchoredScaler> {
        let logo = self.logo.clone()?;
        self.fill();

        let aspect_ratio = logo.aspect_ratio();
        let size = logo_size(initial_width, aspect_ratio);
        let center = self.surface.center();
        let origin = Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0);
        let initial = Rect::from_origin_size(origin, size);

        self.surface
            .composite(CompositeOp::DestinationOut)
            .draw_image(logo.pixmap(), initial);

        let anchor_position = origin + anchor.offset_in(size);
        tracing::debug!(
            initial_width,
            anchor_x = anchor_position.x,
            anchor_y = anchor_position.y,
            "anchor frozen"
        );
        Some(AnchoredScaler {
            anchor_position,
            aspect_ratio,
            anchor,
            logo,
        })
    }

    /// Repaint at `width` through `scaler`, or just fill when there is none.
    pub fn repaint(&mut self, scaler: Option<&AnchoredScaler>, width: f64) -> Option<Rect> {
        match scaler {
            Some(scaler) => scaler.scale_to(&mut self.surface, self.fill, width),
            None => {
                self.fill();
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/mask.rs"]
mod tests;
