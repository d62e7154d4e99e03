/// Convenience result type used across hero-reveal.
pub type RevealResult<T> = Result<T, RevealError>;

/// Top-level error taxonomy used by the crate's fallible APIs.
///
/// Most runtime failures of the effect itself are swallowed at the lifecycle boundary and
/// degrade to "no mask"; these variants surface where a caller can act on them (config files,
/// CLI input, explicit decode calls).
#[derive(thiserror::Error, Debug)]
pub enum RevealError {
    /// Invalid configuration values or unparseable config strings.
    #[error("config error: {0}")]
    Config(String),

    /// SVG source could not be parsed.
    #[error("svg error: {0}")]
    Svg(String),

    /// SVG parsed but could not be rasterized into a bitmap.
    #[error("raster error: {0}")]
    Raster(String),

    /// Invalid caller-provided values (anchor ratios, sizes).
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RevealError {
    /// Build a [`RevealError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`RevealError::Svg`] value.
    pub fn svg(msg: impl Into<String>) -> Self {
        Self::Svg(msg.into())
    }

    /// Build a [`RevealError::Raster`] value.
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    /// Build a [`RevealError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
