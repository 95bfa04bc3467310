//! Font descriptors and text measurement.
//!
//! Canvas scripts draw text anchored at its baseline, so placing a label at
//! its visual center needs the width, height and ascent of the exact string in
//! the configured font.
//!
//! # Overview
//!
//! - [`FontDescriptor`] - Font family and point size, as set on the canvas
//! - [`TextExtent`] - The measured extent of one string
//! - [`TextMetrics`] - The measurement seam
//! - [`CosmicTextMetrics`] - Measurement backed by `cosmic-text` shaping
//!
//! # Quick Start
//!
//! ```
//! # use easel_core::text::{CosmicTextMetrics, FontDescriptor, TextMetrics};
//! let font = FontDescriptor::new("Helvetica", 14);
//! assert_eq!(font.css_font(), "14pt Helvetica");
//!
//! let extent = CosmicTextMetrics.measure("Cl", &font);
//! assert!(extent.width() > 0.0);
//! assert!(extent.height() > 0.0);
//! ```

use std::sync::{Mutex, OnceLock, PoisonError};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::{debug, info};
use serde::Deserialize;

// Points to CSS pixels at the standard 96 DPI.
const POINTS_TO_PIXELS: f32 = 1.33;
const LINE_HEIGHT_FACTOR: f32 = 1.15;
// Fallbacks when shaping yields no layout runs (no usable font installed).
const FALLBACK_ADVANCE_FACTOR: f32 = 0.55;
const FALLBACK_ASCENT_FACTOR: f32 = 0.8;

/// The font used for text on the canvas.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Family   | `"Arial"` |
/// | Size     | `12` (points) |
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FontDescriptor {
    family: String,
    size: u16,
}

impl FontDescriptor {
    /// Creates a font descriptor.
    ///
    /// # Arguments
    ///
    /// * `family` - The font family name (e.g., "Arial", "Times New Roman", "monospace")
    /// * `size` - The font size in points
    pub fn new(family: &str, size: u16) -> Self {
        Self {
            family: family.to_string(),
            size,
        }
    }

    /// Returns the font family name.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Returns the font size in points.
    pub fn size(&self) -> u16 {
        self.size
    }

    /// Returns the value for the canvas `font` property, e.g. `"12pt Arial"`.
    pub fn css_font(&self) -> String {
        format!("{}pt {}", self.size, self.family)
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::new("Arial", 12)
    }
}

/// The measured extent of a string, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextExtent {
    width: f64,
    height: f64,
    ascent: f64,
}

impl TextExtent {
    pub fn new(width: f64, height: f64, ascent: f64) -> Self {
        Self {
            width,
            height,
            ascent,
        }
    }

    /// Advance width of the whole string.
    pub fn width(self) -> f64 {
        self.width
    }

    /// Total line height of the string.
    pub fn height(self) -> f64 {
        self.height
    }

    /// Distance from the top of the first line to its baseline.
    pub fn ascent(self) -> f64 {
        self.ascent
    }
}

/// Measures strings in a given font.
///
/// Implementations must be deterministic: measuring the same string in the
/// same font twice returns the same extent.
pub trait TextMetrics {
    fn measure(&self, text: &str, font: &FontDescriptor) -> TextExtent;
}

impl<T: TextMetrics + ?Sized> TextMetrics for &T {
    fn measure(&self, text: &str, font: &FontDescriptor) -> TextExtent {
        (**self).measure(text, font)
    }
}

/// Text measurement using `cosmic-text` shaping against system fonts.
///
/// All instances share one process-wide font system that is loaded on first
/// use.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosmicTextMetrics;

impl TextMetrics for CosmicTextMetrics {
    fn measure(&self, text: &str, font: &FontDescriptor) -> TextExtent {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .measure(text, font)
    }
}

/// TextManager owns the font system used for shaping.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Measure `text` by shaping it with cosmic-text.
    ///
    /// Width is the right edge of the widest layout run, height is one line
    /// height per run, and ascent is the baseline offset of the first run.
    fn measure(&self, text: &str, font: &FontDescriptor) -> TextExtent {
        if text.is_empty() {
            return TextExtent::default();
        }

        // A panic while shaping leaves the font system usable.
        let mut font_system = self
            .font_system
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let font_size_px = font.size() as f32 * POINTS_TO_PIXELS;
        let metrics = Metrics::new(font_size_px, font_size_px * LINE_HEIGHT_FACTOR);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);
        let attrs = Attrs::new().family(Family::Name(font.family()));

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;
        let mut ascent: Option<f32> = None;

        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                max_width = max_width.max(last.x + last.w);
            }
            ascent.get_or_insert(run.line_y - run.line_top);
            total_height += metrics.line_height;
        }

        let fallback_width = text.chars().count() as f32 * font_size_px * FALLBACK_ADVANCE_FACTOR;
        let extent = match ascent {
            Some(ascent) => {
                if max_width <= 0.0 {
                    debug!(text; "No glyphs shaped, using fallback width");
                    max_width = fallback_width;
                }
                TextExtent::new(max_width as f64, total_height as f64, ascent as f64)
            }
            None => {
                debug!(text; "No layout runs produced, using fallback metrics");
                TextExtent::new(
                    fallback_width as f64,
                    metrics.line_height as f64,
                    (font_size_px * FALLBACK_ASCENT_FACTOR) as f64,
                )
            }
        };

        debug!(
            text,
            width = extent.width(),
            height = extent.height(),
            ascent = extent.ascent();
            "Measured text"
        );
        extent
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
