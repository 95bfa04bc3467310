//! Configuration types for Easel rendering.
//!
//! This module provides configuration structures that control how element
//! trees are placed on the canvas and which font labels use. All types
//! implement [`serde::Deserialize`] for loading from TOML files.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining canvas, font and model settings.
//! - [`CanvasConfig`] - Canvas size, fitting and HTML element id.
//! - [`FontDescriptor`] - Font family and point size of labels.
//! - [`RendererModel`] - Keyed rendering parameters such as `scale`.
//!
//! # Example
//!
//! ```
//! # use easel::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [canvas]
//!     width = 800
//!     flip_y = true
//!
//!     [font]
//!     family = "Helvetica"
//!
//!     [model]
//!     scale = 30.0
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.canvas().width(), 800);
//! assert_eq!(config.canvas().height(), 512);
//! assert_eq!(config.font().size(), 12);
//! assert_eq!(config.model().scale(), Some(30.0));
//! ```

use serde::Deserialize;

use easel_core::{
    geometry::{Bounds, Point},
    model::RendererModel,
    text::FontDescriptor,
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Canvas configuration section.
    #[serde(default)]
    canvas: CanvasConfig,

    /// Label font section.
    #[serde(default)]
    font: FontDescriptor,

    /// Renderer model parameters.
    #[serde(default)]
    model: RendererModel,
}

impl AppConfig {
    pub fn new(canvas: CanvasConfig, font: FontDescriptor, model: RendererModel) -> Self {
        Self {
            canvas,
            font,
            model,
        }
    }

    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    pub fn font(&self) -> &FontDescriptor {
        &self.font
    }

    pub fn model(&self) -> &RendererModel {
        &self.model
    }
}

/// Target canvas settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Width in device pixels.
    width: u32,
    /// Height in device pixels.
    height: u32,
    /// Fraction of the canvas left empty around a fitted drawing.
    margin: f64,
    /// Whether to fit the drawing to the canvas. Without fitting, model
    /// coordinates are device coordinates.
    fit: bool,
    /// Whether model y grows upward.
    flip_y: bool,
    /// `id` attribute of the `<canvas>` element in HTML output.
    id: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            margin: 0.1,
            fit: true,
            flip_y: false,
            id: "canvas".to_string(),
        }
    }
}

impl CanvasConfig {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn fit(&self) -> bool {
        self.fit
    }

    pub fn flip_y(&self) -> bool {
        self.flip_y
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sets the canvas size in device pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Enables or disables fitting the drawing to the canvas.
    pub fn with_fit(mut self, fit: bool) -> Self {
        self.fit = fit;
        self
    }

    pub fn with_flip_y(mut self, flip_y: bool) -> Self {
        self.flip_y = flip_y;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// The canvas area in device coordinates, origin at the top left.
    pub fn device_bounds(&self) -> Bounds {
        Bounds::new_from_corners(
            Point::new(0.0, 0.0),
            Point::new(self.width as f64, self.height as f64),
        )
    }
}
