use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::ease::Ease;
use crate::foundation::color::Rgba8;
use crate::foundation::core::Anchor;
use crate::foundation::error::{RevealError, RevealResult};
use crate::scroll::trigger::{ScrollEdge, ScrollRange};

/// Custom property holding the mask fill color.
pub const FILL_COLOR_PROPERTY: &str = "--_hero-scroll-animation---colors--video-upper-bg";
/// Custom property holding the scroll-range end percentage.
pub const END_PERCENTAGE_PROPERTY: &str =
    "--_hero-scroll-animation---sizes--active-scroll-percentage";

/// Width the cut-out grows to at the end of the scroll range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalWidth {
    /// A multiple of the surface height.
    ContainerHeightMultiple(f64),
    /// A fixed width in pixels.
    Fixed(f64),
}

impl TerminalWidth {
    /// Terminal width for a surface of `surface_height` pixels.
    pub fn resolve(self, surface_height: f64) -> f64 {
        match self {
            Self::ContainerHeightMultiple(k) => surface_height * k,
            Self::Fixed(px) => px,
        }
    }

    fn value(self) -> f64 {
        match self {
            Self::ContainerHeightMultiple(v) | Self::Fixed(v) => v,
        }
    }
}

impl Default for TerminalWidth {
    fn default() -> Self {
        Self::ContainerHeightMultiple(11.0)
    }
}

/// Tunables for one mounted effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Point of the logo pinned while it scales.
    pub anchor: Anchor,
    /// Initial logo width when the placeholder mark is missing or has zero width.
    pub fallback_initial_width: f64,
    /// Cut-out width at progress 1.
    pub terminal_width: TerminalWidth,
    /// Scroll edge where progress is 0.
    pub scroll_start: String,
    /// Viewport side of the end edge; the element side comes from the end percentage.
    pub scroll_end_viewport: String,
    /// Timing function name (`"none"` for linear).
    pub ease: String,
    /// Custom property read for the fill color.
    pub fill_color_property: String,
    /// Fill color when the property is unset.
    pub default_fill_color: Rgba8,
    /// Custom property read for the end percentage.
    pub end_percentage_property: String,
    /// End percentage when the property is unset.
    pub default_end_percentage: String,
    /// Placeholder fade duration once the effect is ready.
    pub placeholder_fade_secs: f64,
    /// Logo raster resolution relative to its logical SVG size.
    pub raster_scale: f32,
    /// Re-decode the logo on every resize instead of reusing the current bitmap.
    pub rerasterize_on_resize: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            anchor: Anchor::default(),
            fallback_initial_width: 320.0,
            terminal_width: TerminalWidth::default(),
            scroll_start: "top top".to_owned(),
            scroll_end_viewport: "bottom".to_owned(),
            ease: "none".to_owned(),
            fill_color_property: FILL_COLOR_PROPERTY.to_owned(),
            default_fill_color: Rgba8::WHITE,
            end_percentage_property: END_PERCENTAGE_PROPERTY.to_owned(),
            default_end_percentage: "90%".to_owned(),
            placeholder_fade_secs: 0.2,
            raster_scale: 2.0,
            rerasterize_on_resize: false,
        }
    }
}

impl RevealConfig {
    /// Parse and validate a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> RevealResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| RevealError::config(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a config from a JSON string.
    pub fn from_json(s: &str) -> RevealResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse and validate a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> RevealResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RevealError::config(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every field is usable.
    pub fn validate(&self) -> RevealResult<()> {
        self.anchor
            .validate()
            .map_err(|e| RevealError::config(e.to_string()))?;
        positive("fallback_initial_width", self.fallback_initial_width)?;
        positive("terminal_width", self.terminal_width.value())?;
        if !self.placeholder_fade_secs.is_finite() || self.placeholder_fade_secs < 0.0 {
            return Err(RevealError::config(
                "placeholder_fade_secs must be finite and >= 0",
            ));
        }
        if !self.raster_scale.is_finite() || self.raster_scale <= 0.0 || self.raster_scale > 16.0 {
            return Err(RevealError::config("raster_scale must be within (0, 16]"));
        }
        self.scroll_range(&self.default_end_percentage)?;
        self.ease()?;
        Ok(())
    }

    /// Scroll range ending where `end_percentage` of the trigger meets the viewport side.
    pub fn scroll_range(&self, end_percentage: &str) -> RevealResult<ScrollRange> {
        let start: ScrollEdge = self.scroll_start.parse()?;
        let end: ScrollEdge = format!("{} {}", end_percentage.trim(), self.scroll_end_viewport)
            .parse()?;
        Ok(ScrollRange { start, end })
    }

    /// Resolved easing curve.
    pub fn ease(&self) -> RevealResult<Ease> {
        Ease::from_name(&self.ease)
    }
}

fn positive(name: &str, v: f64) -> RevealResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(RevealError::config(format!(
            "{name} must be finite and > 0, got {v}"
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/config.rs"]
mod tests;
