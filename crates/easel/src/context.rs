//! Paint context: everything a paint call reads besides the element tree.
//!
//! A [`PaintContext`] is validated once, up front. Once it exists, the
//! emitter can no longer observe a missing transform, font or scale.

use thiserror::Error;

use easel_core::{
    geometry::Transform,
    model::{RendererModel, SCALE},
    text::{FontDescriptor, TextMetrics},
};

/// Invalid paint configuration. Raised before any statement is emitted.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing renderer model parameter `{0}`")]
    MissingParameter(&'static str),

    #[error("invalid scale {0}: must be a finite, non-zero number")]
    InvalidScale(f64),

    #[error("transform {0:?} is not invertible")]
    SingularTransform([f64; 6]),

    #[error("invalid font `{0}`: family must be non-empty and size positive")]
    InvalidFont(String),
}

/// Immutable inputs of one paint call.
///
/// # Examples
///
/// ```
/// use easel::context::PaintContext;
/// use easel_core::{
///     geometry::Transform,
///     model::RendererModel,
///     text::{CosmicTextMetrics, FontDescriptor},
/// };
///
/// let font = FontDescriptor::default();
/// let context = PaintContext::new(
///     Transform::IDENTITY,
///     &RendererModel::default(),
///     &font,
///     &CosmicTextMetrics,
/// )
/// .expect("default configuration is valid");
/// assert_eq!(context.scale(), 1.0);
/// ```
#[derive(Clone, Copy)]
pub struct PaintContext<'a> {
    transform: Transform,
    font: &'a FontDescriptor,
    metrics: &'a dyn TextMetrics,
    scale: f64,
}

impl<'a> PaintContext<'a> {
    /// Validates and assembles a paint context.
    ///
    /// The scale is read from `model` under [`SCALE`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the scale is missing, zero or not finite,
    /// if the transform has no inverse, or if the font is unusable.
    pub fn new(
        transform: Transform,
        model: &RendererModel,
        font: &'a FontDescriptor,
        metrics: &'a dyn TextMetrics,
    ) -> Result<Self, ConfigError> {
        let scale = model
            .scale()
            .ok_or(ConfigError::MissingParameter(SCALE))?;
        if !scale.is_finite() || scale == 0.0 {
            return Err(ConfigError::InvalidScale(scale));
        }
        if !transform.is_invertible() {
            return Err(ConfigError::SingularTransform(transform.coefficients()));
        }
        if font.family().trim().is_empty() || font.size() == 0 {
            return Err(ConfigError::InvalidFont(font.css_font()));
        }

        Ok(Self {
            transform,
            font,
            metrics,
            scale,
        })
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn font(&self) -> &'a FontDescriptor {
        self.font
    }

    pub fn metrics(&self) -> &'a dyn TextMetrics {
        self.metrics
    }

    /// Device pixels per model unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl std::fmt::Debug for PaintContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintContext")
            .field("transform", &self.transform)
            .field("font", &self.font)
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}
