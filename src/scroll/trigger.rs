use std::fmt;
use std::str::FromStr;

use crate::animation::tween::Tween;
use crate::foundation::core::Rect;
use crate::foundation::error::RevealError;

/// A position along one axis of an element or of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeOffset {
    /// Leading edge (offset 0).
    Top,
    /// Midpoint.
    Center,
    /// Trailing edge (offset = full length).
    Bottom,
    /// Fraction of the length, `0.9` for `"90%"`.
    Percent(f64),
    /// Absolute pixel offset from the leading edge.
    Pixels(f64),
}

impl EdgeOffset {
    /// Offset in pixels for a box of the given length.
    pub fn resolve(self, length: f64) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => length / 2.0,
            Self::Bottom => length,
            Self::Percent(p) => length * p,
            Self::Pixels(px) => px,
        }
    }
}

impl FromStr for EdgeOffset {
    type Err = RevealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let number = |v: &str| {
            v.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| RevealError::config(format!("invalid scroll offset \"{s}\"")))
        };
        match s {
            "top" => Ok(Self::Top),
            "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            _ => {
                if let Some(pct) = s.strip_suffix('%') {
                    Ok(Self::Percent(number(pct)? / 100.0))
                } else if let Some(px) = s.strip_suffix("px") {
                    Ok(Self::Pixels(number(px)?))
                } else {
                    Ok(Self::Pixels(number(s)?))
                }
            }
        }
    }
}

impl fmt::Display for EdgeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => f.write_str("top"),
            Self::Center => f.write_str("center"),
            Self::Bottom => f.write_str("bottom"),
            Self::Percent(p) => write!(f, "{}%", p * 100.0),
            Self::Pixels(px) => write!(f, "{px}px"),
        }
    }
}

/// A scroll boundary: the scroll offset at which `element` on the trigger meets `viewport`.
///
/// Written as `"<element> <viewport>"`, e.g. `"top top"` or `"90% bottom"`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollEdge {
    /// Point on the trigger element.
    pub element: EdgeOffset,
    /// Point on the viewport.
    pub viewport: EdgeOffset,
}

impl ScrollEdge {
    /// Document scroll offset at which this edge is reached.
    pub fn scroll_offset(self, trigger: Rect, viewport_height: f64) -> f64 {
        trigger.y0 + self.element.resolve(trigger.height()) - self.viewport.resolve(viewport_height)
    }
}

impl FromStr for ScrollEdge {
    type Err = RevealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let first = parts
            .next()
            .ok_or_else(|| RevealError::config("empty scroll edge"))?;
        let element: EdgeOffset = first.parse()?;
        let viewport = match parts.next() {
            Some(p) => p.parse()?,
            None => element,
        };
        if parts.next().is_some() {
            return Err(RevealError::config(format!(
                "scroll edge \"{s}\" must have at most two parts"
            )));
        }
        Ok(Self { element, viewport })
    }
}

impl fmt::Display for ScrollEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}

/// Start and end edges of the scroll-linked range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRange {
    /// Where progress is 0.
    pub start: ScrollEdge,
    /// Where progress is 1.
    pub end: ScrollEdge,
}

impl ScrollRange {
    /// `(start, end)` scroll offsets for a trigger element laid out at `trigger`.
    pub fn resolve(&self, trigger: Rect, viewport_height: f64) -> (f64, f64) {
        (
            self.start.scroll_offset(trigger, viewport_height),
            self.end.scroll_offset(trigger, viewport_height),
        )
    }
}

/// Scrubbed scroll trigger driving a single tween.
///
/// Progress follows the scroll position directly. [`ScrollTrigger::update`] only yields a
/// value when progress actually moved, so a stationary scroll position does not repaint.
#[derive(Debug)]
pub struct ScrollTrigger {
    tween: Tween,
    start: f64,
    end: f64,
    last_progress: Option<f64>,
    killed: bool,
}

impl ScrollTrigger {
    /// Create a trigger for `tween` over `range`, resolved against the current layout.
    pub fn new(tween: Tween, range: ScrollRange, trigger: Rect, viewport_height: f64) -> Self {
        let (start, end) = range.resolve(trigger, viewport_height);
        tracing::debug!(start, end, from = tween.from, to = tween.to, "scroll trigger created");
        Self {
            tween,
            start,
            end,
            last_progress: None,
            killed: false,
        }
    }

    /// Resolved `(start, end)` scroll offsets.
    pub fn bounds(&self) -> (f64, f64) {
        (self.start, self.end)
    }

    /// The driven tween.
    pub fn tween(&self) -> Tween {
        self.tween
    }

    /// Progress in `[0, 1]` for a scroll offset.
    pub fn progress_at(&self, scroll_y: f64) -> f64 {
        if self.end > self.start {
            ((scroll_y - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
        } else if scroll_y >= self.start {
            1.0
        } else {
            0.0
        }
    }

    /// Last emitted progress, if any.
    pub fn progress(&self) -> Option<f64> {
        self.last_progress
    }

    /// Feed a new scroll offset. Returns the tween value when progress changed.
    pub fn update(&mut self, scroll_y: f64) -> Option<f64> {
        if self.killed || !scroll_y.is_finite() {
            return None;
        }
        let progress = self.progress_at(scroll_y);
        if self.last_progress == Some(progress) {
            return None;
        }
        self.last_progress = Some(progress);
        Some(self.tween.value_at(progress))
    }

    /// Stop the trigger permanently.
    pub fn kill(&mut self) {
        self.killed = true;
    }

    /// Whether [`ScrollTrigger::kill`] has been called.
    pub fn is_killed(&self) -> bool {
        self.killed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/trigger.rs"]
mod tests;
