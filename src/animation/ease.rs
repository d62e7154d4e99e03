use crate::foundation::error::{RevealError, RevealResult};

/// Easing curve applied to normalized progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Straight linear mapping. Page scripts spell this `"none"`.
    #[default]
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in-out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in-out.
    InOutCubic,
}

impl Ease {
    /// Map `t` (clamped to `[0, 1]`) through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }

    /// Resolve a timing-function name as written in page scripts.
    ///
    /// `"none"`/`"linear"` map to [`Ease::Linear`], `power1.*` to the quadratic curves and
    /// `power2.*` to the cubic ones. A bare `powerN` means the `.out` variant.
    pub fn from_name(name: &str) -> RevealResult<Self> {
        let name = name.trim();
        let ease = match name {
            "none" | "linear" => Self::Linear,
            "power1" | "power1.out" => Self::OutQuad,
            "power1.in" => Self::InQuad,
            "power1.inOut" => Self::InOutQuad,
            "power2" | "power2.out" => Self::OutCubic,
            "power2.in" => Self::InCubic,
            "power2.inOut" => Self::InOutCubic,
            _ => {
                return Err(RevealError::config(format!("unknown ease \"{name}\"")));
            }
        };
        Ok(ease)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
