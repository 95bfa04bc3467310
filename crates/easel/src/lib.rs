//! Easel - HTML canvas scripts from rendering element trees.
//!
//! Loading, fitting, and painting of rendering elements. A painted tree is a
//! sequence of JavaScript statements against a 2D canvas context, optionally
//! wrapped in a standalone HTML page.

pub mod config;
pub mod context;
pub mod export;
pub mod scene;

mod error;

pub use easel_core::{color, element, geometry, model, text};

pub use error::EaselError;
pub use export::canvas::PaintReport;

use std::io::Write;

use log::{debug, info, trace, warn};

use easel_core::{
    element::RenderingElement,
    geometry::Transform,
    model::{RendererModel, SCALE},
    text::CosmicTextMetrics,
};

use config::AppConfig;
use context::PaintContext;
use export::{canvas, html};

/// Builder for loading and painting Easel scenes.
///
/// This provides an API for processing element trees through loading,
/// fitting, and painting stages.
///
/// # Examples
///
/// ```rust
/// use easel::{ScriptBuilder, config::AppConfig};
///
/// let source = r#"
/// [scene]
/// type = "line"
/// x1 = 0.0
/// y1 = 0.0
/// x2 = 10.0
/// y2 = 0.0
/// width = 1.0
/// "#;
///
/// let builder = ScriptBuilder::new(AppConfig::default());
///
/// // Parse the scene to an element tree
/// let scene = builder.parse(source).expect("Failed to parse");
///
/// // Paint the tree as a canvas script
/// let script = builder.render_script(&scene).expect("Failed to render");
/// assert!(script.starts_with("context.font=\"12pt Arial\";\n"));
/// ```
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    config: AppConfig,
    strict: bool,
}

impl ScriptBuilder {
    /// Create a new script builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            strict: false,
        }
    }

    /// Fail renders whose output is incomplete instead of returning the
    /// partial script.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a TOML scene into an element tree.
    ///
    /// # Errors
    ///
    /// Returns [`EaselError::Scene`] carrying `source` if the scene is malformed.
    pub fn parse(&self, source: &str) -> Result<RenderingElement, EaselError> {
        info!("Parsing scene");

        let scene =
            scene::parse_scene(source).map_err(|err| EaselError::new_scene_error(err, source))?;

        debug!(elements = scene.iter().count(); "Scene parsed successfully");
        trace!(scene:?; "Parsed scene");

        Ok(scene)
    }

    /// The model-to-device transform for `root` under the canvas configuration.
    ///
    /// With fitting enabled the painted elements are scaled and centered on
    /// the canvas; otherwise model coordinates are used as device coordinates.
    /// Element kinds the canvas backend skips do not affect the fit.
    pub fn transform_for(&self, root: &RenderingElement) -> Transform {
        let canvas = self.config.canvas();
        if !canvas.fit() {
            return Transform::IDENTITY;
        }

        match root.bounds_of(canvas::is_painted) {
            Some(bounds) => Transform::fit(
                bounds,
                canvas.device_bounds(),
                canvas.margin(),
                canvas.flip_y(),
            ),
            None => {
                debug!("Scene has no drawable geometry, using identity transform");
                Transform::IDENTITY
            }
        }
    }

    /// Paint `root` into `sink`.
    ///
    /// When fitting, the configured `scale` is multiplied by the fit zoom so
    /// line widths follow the drawing.
    ///
    /// # Errors
    ///
    /// Returns [`EaselError::Config`] before writing anything if the
    /// configuration is unusable. In strict mode, returns
    /// [`EaselError::Export`] if any statement could not be written;
    /// otherwise failures are logged and reported in the [`PaintReport`].
    pub fn paint_to<W: Write>(
        &self,
        root: &RenderingElement,
        sink: &mut W,
    ) -> Result<PaintReport, EaselError> {
        let transform = self.transform_for(root);
        let model = self.effective_model(transform);
        let context = PaintContext::new(transform, &model, self.config.font(), &CosmicTextMetrics)?;
        debug!(context:?; "Paint context ready");

        info!(font = self.config.font().css_font(); "Painting scene");
        let report = canvas::paint(sink, &context, root);
        info!(
            symbols = report.symbols(),
            lines = report.lines(),
            skipped = report.skipped(),
            failures = report.errors().len();
            "Scene painted"
        );

        if !report.is_clean() {
            if self.strict {
                return Err(EaselError::Export(report.into_errors()));
            }
            warn!(failures = report.errors().len(); "Canvas script is incomplete");
        }

        Ok(report)
    }

    /// Paint `root` to a canvas script string.
    ///
    /// # Errors
    ///
    /// See [`paint_to`](Self::paint_to).
    pub fn render_script(&self, root: &RenderingElement) -> Result<String, EaselError> {
        let mut script = Vec::new();
        self.paint_to(root, &mut script)?;
        Ok(String::from_utf8_lossy(&script).into_owned())
    }

    /// Paint `root` into a standalone HTML page.
    ///
    /// # Errors
    ///
    /// See [`paint_to`](Self::paint_to).
    pub fn render_html(&self, root: &RenderingElement) -> Result<String, EaselError> {
        let script = self.render_script(root)?;
        let canvas = self.config.canvas();

        let mut page = Vec::new();
        html::write_page(
            &mut page,
            html::CanvasElement::new(canvas.id(), canvas.width(), canvas.height()),
            &script,
        )?;

        info!(id = canvas.id(); "HTML page rendered");
        Ok(String::from_utf8_lossy(&page).into_owned())
    }

    fn effective_model(&self, transform: Transform) -> RendererModel {
        let mut model = self.config.model().clone();
        if !self.config.canvas().fit() {
            return model;
        }
        if let Some(scale) = model.scale() {
            let [a, b, ..] = transform.coefficients();
            model.set_parameter(SCALE, scale * a.hypot(b));
        }
        model
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use easel_core::{
        color::Color,
        element::{ElementGroup, LineElement, OvalElement, RectangleElement, SymbolElement},
        text::FontDescriptor,
    };

    use super::*;
    use crate::config::CanvasConfig;

    fn unfitted(scale: f64) -> ScriptBuilder {
        ScriptBuilder::new(AppConfig::new(
            CanvasConfig::default().with_fit(false),
            FontDescriptor::default(),
            RendererModel::empty().with_parameter(SCALE, scale),
        ))
    }

    #[test]
    fn test_unfitted_uses_identity() {
        let root: RenderingElement = LineElement::new(1.0, 2.0, 3.0, 4.0, 1.0).into();
        assert_eq!(unfitted(1.0).transform_for(&root), Transform::IDENTITY);
    }

    #[test]
    fn test_fitted_transform_centers_drawing() {
        let root: RenderingElement = LineElement::new(-1.0, 0.0, 1.0, 0.0, 0.1).into();
        let builder = ScriptBuilder::new(AppConfig::new(
            CanvasConfig::default().with_size(200, 100).with_margin(0.0),
            FontDescriptor::default(),
            RendererModel::default(),
        ));

        let transform = builder.transform_for(&root);
        assert_eq!(transform.transform_point(-1.0, 0.0), (0, 50));
        assert_eq!(transform.transform_point(1.0, 0.0), (200, 50));
    }

    #[test]
    fn test_fit_ignores_skipped_kinds() {
        let root: RenderingElement = ElementGroup::new()
            .with_child(RectangleElement::new(-100.0, -100.0, 500.0, 500.0, true, Color::BLACK))
            .with_child(OvalElement::new(300.0, 0.0, 50.0, false, Color::BLACK))
            .with_child(LineElement::new(-1.0, 0.0, 1.0, 0.0, 0.1))
            .into();
        let builder = ScriptBuilder::new(AppConfig::new(
            CanvasConfig::default().with_size(200, 100).with_margin(0.0),
            FontDescriptor::default(),
            RendererModel::default(),
        ));

        let transform = builder.transform_for(&root);
        assert_eq!(transform.transform_point(-1.0, 0.0), (0, 50));
        assert_eq!(transform.transform_point(1.0, 0.0), (200, 50));
    }

    #[test]
    fn test_only_skipped_kinds_uses_identity() {
        let root: RenderingElement = ElementGroup::new()
            .with_child(RectangleElement::new(10.0, 10.0, 5.0, 5.0, false, Color::BLACK))
            .into();
        let builder = ScriptBuilder::new(AppConfig::default());
        assert_eq!(builder.transform_for(&root), Transform::IDENTITY);
    }

    #[test]
    fn test_fitted_scale_follows_zoom() {
        let builder = ScriptBuilder::new(AppConfig::new(
            CanvasConfig::default().with_size(200, 200).with_margin(0.0),
            FontDescriptor::default(),
            RendererModel::empty().with_parameter(SCALE, 2.0),
        ));
        let model = builder.effective_model(Transform::scale(50.0, -50.0));
        assert_approx_eq!(f64, model.scale().unwrap(), 100.0);
    }

    #[test]
    fn test_unfitted_scale_is_configured_scale() {
        let model = unfitted(3.0).effective_model(Transform::scale(50.0, 50.0));
        assert_eq!(model.scale(), Some(3.0));
    }

    #[test]
    fn test_render_script_line_width_uses_scale() {
        let root: RenderingElement = LineElement::new(0.0, 0.0, 10.0, 0.0, 0.1).into();
        let script = unfitted(30.0).render_script(&root).unwrap();
        assert!(script.contains("context.lineWidth=3;\n"));
        assert!(script.contains("context.moveTo(0,0); context.lineTo(10,0); context.stroke();\n"));
    }

    #[test]
    fn test_zero_scale_is_rejected_before_output() {
        let root: RenderingElement = LineElement::new(0.0, 0.0, 10.0, 0.0, 1.0).into();
        let mut sink = Vec::new();
        let result = unfitted(0.0).paint_to(&root, &mut sink);
        assert!(matches!(result, Err(EaselError::Config(_))));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_render_html_escapes_font_family() {
        let builder = ScriptBuilder::new(AppConfig::new(
            CanvasConfig::default().with_fit(false),
            FontDescriptor::new("Times \"New\" </script>", 12),
            RendererModel::default(),
        ));
        let root: RenderingElement =
            SymbolElement::new("O", 0.0, 0.0, Color::rgb(255, 13, 13)).into();
        let html = builder.render_html(&root).unwrap();
        assert!(html.contains("context.font=\"12pt Times \\\"New\\\" \\x3C/script>\";\n"));
        assert_eq!(html.matches("</script>").count(), 1);
    }

    #[test]
    fn test_model_section_without_scale_renders() {
        let config: AppConfig = toml::from_str("[model]\nzoom = 2.0\n").unwrap();
        let root: RenderingElement = LineElement::new(0.0, 0.0, 10.0, 0.0, 1.0).into();
        let script = ScriptBuilder::new(config)
            .with_strict(true)
            .render_script(&root)
            .unwrap();
        assert!(script.contains("context.stroke();\n"));
    }

    #[test]
    fn test_render_html_wraps_script() {
        let root: RenderingElement = ElementGroup::new()
            .with_child(SymbolElement::new("N", 0.0, 0.0, Color::rgb(48, 80, 248)))
            .into();
        let html = unfitted(1.0).render_html(&root).unwrap();
        assert!(html.contains("<canvas id=\"canvas\" width=\"512\" height=\"512\">"));
        assert!(html.contains("context.font=\"12pt Arial\";\n"));
        assert!(html.contains("context.fillText(\"N\","));
    }
}
