//! hero-reveal renders a scroll-driven "logo cut-out" mask over a background video.
//!
//! A solid fill covers the hero section. The logo is stamped into it with `destination-out`
//! compositing, so the logo shape becomes a transparent window onto the video underneath. As
//! the page scrolls, the cut-out grows while one chosen point of the logo (the *anchor*) stays
//! pinned to the same surface position, until the logo fills the viewport.
//!
//! # Pipeline overview
//!
//! 1. **Rasterize**: the inline `<svg>` logo is serialized, wrapped in a single-use object URL
//!    and decoded on the next event loop turn into a [`RasterizedLogo`] (`usvg` + `resvg`).
//! 2. **Anchor**: [`MaskRenderer::anchored_scaler`] paints the logo centered at its initial
//!    width and freezes the anchor position into an [`AnchoredScaler`].
//! 3. **Drive**: a [`ScrollTrigger`] maps the scroll offset over the trigger element to
//!    progress, and a [`Tween`] maps progress to a cut-out width.
//! 4. **Repaint**: every progress change re-fills the [`Surface`] and redraws the cut-out at the
//!    new width via [`AnchoredScaler::scale_to`].
//!
//! [`HeroReveal`] owns all of the above and exposes the page lifecycle (`on_load`,
//! `run_pending`, `on_scroll`, `on_resize`, `teardown`) against any [`PageHost`].
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded**: decodes complete only when the owner pumps [`HeroReveal::run_pending`].
//! - **Fail quiet at the page boundary**: missing elements or failed decodes leave a plain fill
//!   instead of erroring.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod effect;
mod foundation;
mod page;
mod render;
mod scroll;

pub use animation::ease::Ease;
pub use animation::tween::Tween;
pub use assets::logo::{LogoElement, derive_aspect_ratio, parse_view_box};
pub use assets::object_url::{Blob, ObjectUrl, ObjectUrls, SVG_MIME};
pub use assets::raster::{
    DecodeCompletion, LogoRasterizer, RasterizedLogo, decode_logo, raster_size,
};
pub use effect::config::{
    END_PERCENTAGE_PROPERTY, FILL_COLOR_PROPERTY, RevealConfig, TerminalWidth,
};
pub use effect::reveal::{HeroReveal, RevealState};
pub use foundation::color::Rgba8;
pub use foundation::core::{Anchor, Point, Rect, Size, Vec2, logo_size};
pub use foundation::error::{RevealError, RevealResult};
pub use page::host::{ElementId, LookupLog, PageHost, Role};
pub use page::static_page::{StaticElement, StaticPage};
pub use render::mask::{AnchoredScaler, MaskRenderer};
pub use render::surface::{CompositeOp, CompositeScope, PremulRgba8, Surface};
pub use scroll::trigger::{EdgeOffset, ScrollEdge, ScrollRange, ScrollTrigger};
