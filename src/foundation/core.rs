pub use kurbo::{Point, Rect, Size, Vec2};

use crate::foundation::error::{RevealError, RevealResult};

/// A fixed point inside the logo's own bounding box, as fractions of its width and height.
///
/// This is the point that stays visually stationary while the logo scales.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    /// Horizontal position, 0 = left edge, 1 = right edge.
    pub left_ratio: f64,
    /// Vertical position, 0 = top edge, 1 = bottom edge.
    pub top_ratio: f64,
}

impl Anchor {
    /// Build an anchor, rejecting ratios outside `[0, 1]`.
    pub fn new(left_ratio: f64, top_ratio: f64) -> RevealResult<Self> {
        let anchor = Self {
            left_ratio,
            top_ratio,
        };
        anchor.validate()?;
        Ok(anchor)
    }

    /// Check both ratios are finite and within `[0, 1]`.
    pub fn validate(&self) -> RevealResult<()> {
        for (name, v) in [("left_ratio", self.left_ratio), ("top_ratio", self.top_ratio)] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(RevealError::validation(format!(
                    "anchor {name} must be within [0, 1], got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Offset of the anchor from the top-left corner of a box of `size`.
    pub fn offset_in(self, size: Size) -> Vec2 {
        Vec2::new(size.width * self.left_ratio, size.height * self.top_ratio)
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self {
            left_ratio: 0.63,
            top_ratio: 0.717,
        }
    }
}

/// Size of a logo drawn at `width` with the given aspect ratio (`width / height`).
pub fn logo_size(width: f64, aspect_ratio: f64) -> Size {
    Size::new(width, width / aspect_ratio)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
