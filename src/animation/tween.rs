use crate::animation::ease::Ease;

/// A single numeric tween from `from` to `to`, sampled by normalized progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween {
    /// Value at progress 0.
    pub from: f64,
    /// Value at progress 1.
    pub to: f64,
    /// Curve applied to progress before interpolating.
    pub ease: Ease,
}

impl Tween {
    /// Linear tween between two values.
    pub fn linear(from: f64, to: f64) -> Self {
        Self {
            from,
            to,
            ease: Ease::Linear,
        }
    }

    /// Interpolated value at `progress` (clamped to `[0, 1]`).
    pub fn value_at(&self, progress: f64) -> f64 {
        let t = self.ease.apply(progress);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * t
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
