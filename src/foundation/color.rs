use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{RevealError, RevealResult};

/// Straight (non-premultiplied) RGBA8 color, as written in CSS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 = opaque.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white, the default mask fill.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Build a color from its four channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a CSS color value.
    ///
    /// Supports `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(...)`/`rgba(...)` with comma or
    /// space separators, and the keywords `white`, `black` and `transparent`.
    pub fn parse_css(s: &str) -> RevealResult<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_args(args);
        }
        match lower.as_str() {
            "white" => Ok(Self::WHITE),
            "black" => Ok(Self::rgba(0, 0, 0, 255)),
            "transparent" => Ok(Self::TRANSPARENT),
            _ => Err(RevealError::config(format!("unsupported css color \"{s}\""))),
        }
    }

    pub(crate) fn to_skia(self) -> resvg::tiny_skia::Color {
        resvg::tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Rgba8 {
    type Err = RevealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_css(s)
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        ))
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse_css(&s).map_err(serde::de::Error::custom)
    }
}

fn parse_hex(s: &str) -> RevealResult<Rgba8> {
    fn hex_byte(pair: &str) -> RevealResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| RevealError::config(format!("invalid hex byte \"{pair}\"")))
    }

    fn hex_nibble(c: &str) -> RevealResult<u8> {
        let v = hex_byte(c)?;
        Ok(v * 17)
    }

    if !s.is_ascii() {
        return Err(RevealError::config("hex color must be ascii"));
    }

    match s.len() {
        3 | 4 => {
            let r = hex_nibble(&s[0..1])?;
            let g = hex_nibble(&s[1..2])?;
            let b = hex_nibble(&s[2..3])?;
            let a = if s.len() == 4 {
                hex_nibble(&s[3..4])?
            } else {
                255
            };
            Ok(Rgba8::rgba(r, g, b, a))
        }
        6 | 8 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            let a = if s.len() == 8 {
                hex_byte(&s[6..8])?
            } else {
                255
            };
            Ok(Rgba8::rgba(r, g, b, a))
        }
        _ => Err(RevealError::config(
            "hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA",
        )),
    }
}

fn parse_rgb_args(args: &str) -> RevealResult<Rgba8> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(RevealError::config(format!(
            "rgb() expects 3 or 4 components, got {}",
            parts.len()
        )));
    }

    fn channel(p: &str) -> RevealResult<u8> {
        let v = match p.strip_suffix('%') {
            Some(pct) => parse_num(pct)? / 100.0 * 255.0,
            None => parse_num(p)?,
        };
        Ok(v.round().clamp(0.0, 255.0) as u8)
    }

    fn alpha(p: &str) -> RevealResult<u8> {
        let v = match p.strip_suffix('%') {
            Some(pct) => parse_num(pct)? / 100.0,
            None => parse_num(p)?,
        };
        Ok((v.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    fn parse_num(p: &str) -> RevealResult<f64> {
        p.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| RevealError::config(format!("invalid color component \"{p}\"")))
    }

    let a = match parts.get(3) {
        Some(p) => alpha(p)?,
        None => 255,
    };
    Ok(Rgba8::rgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        a,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
