use crate::foundation::core::Size;
use crate::foundation::error::{RevealError, RevealResult};

/// Snapshot of the inline vector logo element at the moment it is rasterized.
#[derive(Clone, Debug, PartialEq)]
pub struct LogoElement {
    /// Self-contained serialized markup of the `<svg>` element.
    pub markup: String,
    /// Raw `viewBox` attribute, if declared.
    pub view_box: Option<String>,
    /// Declared `width` attribute in pixels, if it is an absolute length.
    pub width: Option<f64>,
    /// Declared `height` attribute in pixels, if it is an absolute length.
    pub height: Option<f64>,
    /// Rendered client box of the element.
    pub client_size: Size,
}

impl LogoElement {
    /// Read the root `<svg>` attributes out of serialized markup.
    pub fn from_markup(markup: impl Into<String>, client_size: Size) -> RevealResult<Self> {
        let markup = markup.into();
        let (view_box, width, height) = {
            let doc = roxmltree::Document::parse(&markup)
                .map_err(|e| RevealError::svg(format!("parse logo markup: {e}")))?;
            let root = doc.root_element();
            if root.tag_name().name() != "svg" {
                return Err(RevealError::svg(format!(
                    "logo root element must be <svg>, got <{}>",
                    root.tag_name().name()
                )));
            }
            (
                root.attribute("viewBox").map(str::to_owned),
                root.attribute("width").and_then(parse_length_px),
                root.attribute("height").and_then(parse_length_px),
            )
        };
        Ok(Self {
            markup,
            view_box,
            width,
            height,
            client_size,
        })
    }
}

/// Parse a `viewBox` value into `(min_x, min_y, width, height)`.
pub fn parse_view_box(s: &str) -> Option<(f64, f64, f64, f64)> {
    let nums: Vec<f64> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<_>>()?;
    match nums.as_slice() {
        &[x, y, w, h] => Some((x, y, w, h)),
        _ => None,
    }
}

/// Width/height ratio of the logo.
///
/// Prefers the declared `viewBox`, then the declared size (falling back per axis to the
/// client box). Any source that yields a non-positive height or a non-finite ratio keeps
/// `previous`.
pub fn derive_aspect_ratio(element: &LogoElement, previous: f64) -> f64 {
    if let Some((_, _, w, h)) = element.view_box.as_deref().and_then(parse_view_box) {
        return ratio_or(w, h, previous);
    }

    let w = element
        .width
        .filter(|w| *w > 0.0)
        .unwrap_or(element.client_size.width);
    let h = element
        .height
        .filter(|h| *h > 0.0)
        .unwrap_or(element.client_size.height);
    ratio_or(w, h, previous)
}

fn ratio_or(w: f64, h: f64, previous: f64) -> f64 {
    if h <= 0.0 {
        return previous;
    }
    let ratio = w / h;
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        previous
    }
}

fn parse_length_px(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix("px").unwrap_or(s);
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/logo.rs"]
mod tests;
